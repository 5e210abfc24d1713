use std::collections::VecDeque;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use string_queue::{QueueError, StrQueue};

fn random_string(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..=24);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[test]
fn sort_ten_thousand_values() -> Result<(), QueueError> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut q = StrQueue::new();
    let mut expected = Vec::new();

    for _ in 0..10_000 {
        let s = random_string(&mut rng);
        if rng.gen_bool(0.5) {
            q.insert_head(&s)?;
        } else {
            q.insert_tail(&s)?;
        }
        expected.push(s);
    }
    assert_eq!(q.len(), 10_000);

    q.sort();
    assert_eq!(q.len(), 10_000);
    let sorted: Vec<&str> = q.iter().collect();
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

    expected.sort();
    assert_eq!(sorted, expected);

    q.reverse();
    q.reverse();
    assert!(q.iter().eq(expected.iter().map(String::as_str)));
    assert_eq!(q.back(), expected.last().map(String::as_str));

    let mut drained = 0;
    while q.pop_head().is_some() {
        drained += 1;
    }
    assert_eq!(drained, 10_000);
    assert!(q.is_empty());
    Ok(())
}

#[test]
fn random_operations_match_model() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut q = StrQueue::new();
    let mut model: VecDeque<String> = VecDeque::new();

    for _ in 0..5_000 {
        match rng.gen_range(0..10) {
            0..=2 => {
                let s = random_string(&mut rng);
                q.insert_head(&s).unwrap();
                model.push_front(s);
            }
            3..=5 => {
                let s = random_string(&mut rng);
                q.insert_tail(&s).unwrap();
                model.push_back(s);
            }
            6..=7 => {
                let mut buf = [0xffu8; 8];
                match model.pop_front() {
                    Some(s) => {
                        q.remove_head(Some(&mut buf[..])).unwrap();
                        let n = s.len().min(7);
                        assert_eq!(&buf[..n], &s.as_bytes()[..n]);
                        assert_eq!(buf[n], 0);
                    }
                    None => {
                        assert_eq!(
                            q.remove_head(Some(&mut buf[..])),
                            Err(QueueError::EmptyQueue)
                        );
                    }
                }
            }
            8 => {
                q.reverse();
                model = model.into_iter().rev().collect();
            }
            _ => {
                q.sort();
                model.make_contiguous().sort();
            }
        }

        assert_eq!(q.len(), model.len());
        assert_eq!(q.front(), model.front().map(String::as_str));
        assert_eq!(q.back(), model.back().map(String::as_str));
    }

    assert!(q.iter().eq(model.iter().map(String::as_str)));
}
