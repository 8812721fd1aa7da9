// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod memoize_tests {
    use crate::common::{Error, WadConfig};
    use crate::log::StringLogger;
    use crate::memoize::{Memoize, MemoizeOptions};
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn hit_and_miss() {
        let calls = AtomicUsize::new(0);
        let memo = Memoize::<u32, usize>::builder().build();
        let counted = |_: &[u32]| calls.fetch_add(1, Ordering::SeqCst) + 100;

        assert_eq!(memo.call(&[7], counted), 100);
        // A second real call would return 101.
        assert_eq!(memo.call(&[7], counted), 100);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(memo.call(&[8], counted), 101);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn expiry() {
        let calls = AtomicUsize::new(0);
        let memo = Memoize::<&str, usize>::builder()
            .expiry_time(Duration::from_millis(50))
            .build();
        let counted = |_: &[&str]| calls.fetch_add(1, Ordering::SeqCst);

        assert_eq!(memo.call(&["queue"], counted), 0);
        assert_eq!(memo.call(&["queue"], counted), 0);
        thread::sleep(Duration::from_millis(80));
        assert_eq!(memo.call(&["queue"], counted), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // The stale entry was overwritten, not duplicated.
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn zero_expiry_never_expires() {
        let memo = Memoize::<u8, u8>::builder().expiry_secs(0).build();
        assert_eq!(memo.call(&[1], |_| 1), 1);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(memo.call(&[1], |_| 2), 1);
    }

    #[test]
    fn key_truncation() {
        let memo = Memoize::<String, String>::builder().num_args(1).build();
        let concat = |args: &[String]| args.concat();
        let one = "1".to_string();

        assert_eq!(memo.call(&[one.clone(), "a".to_string()], concat), "1a");
        assert_eq!(memo.call(&[one.clone(), "b".to_string()], concat), "1a");
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn empty_key_is_shared() {
        let memo = Memoize::<u8, &str>::builder().num_args(0).build();
        assert_eq!(memo.call(&[1, 2], |_| "first"), "first");
        assert_eq!(memo.call(&[3], |_| "second"), "first");
        assert_eq!(memo.len(), 1);

        let connection = Memoize::<(), u32>::builder().build();
        assert_eq!(connection.get(|| 42), 42);
        assert_eq!(connection.get(|| 43), 42);
    }

    #[test]
    fn seeded() {
        let memo = Memoize::<u8, &str>::builder()
            .num_args(1)
            .seed(&[5, 6], "seeded")
            .build();
        assert_eq!(memo.call(&[5, 9], |_| "computed"), "seeded");
        assert_eq!(memo.call(&[6], |_| "computed"), "computed");
    }

    #[test]
    fn errors_are_not_cached() {
        let calls = AtomicUsize::new(0);
        let memo = Memoize::<u8, u8>::builder().build();
        let failing = |_: &[u8]| -> Result<u8, Error> {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Remote("connection refused".to_string()))
        };

        assert!(memo.try_call(&[1], failing).is_err());
        assert!(memo.is_empty());
        assert!(memo.try_call(&[1], failing).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert_eq!(memo.try_call(&[1], |_| Ok::<u8, Error>(3)).ok(), Some(3));
        assert_eq!(memo.try_call(&[1], failing).ok(), Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn wrapped_function() {
        let calls = AtomicUsize::new(0);
        let lookup = Memoize::<u32, u32>::builder()
            .expiry_secs(300)
            .build()
            .wrap(|args: &[u32]| {
                calls.fetch_add(1, Ordering::SeqCst);
                args.iter().sum::<u32>()
            });
        assert_eq!(lookup.call(&[1, 2]), 3);
        assert_eq!(lookup.call(&[1, 2]), 3);
        assert_eq!(lookup.call(&[2, 1]), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(lookup.memoize().len(), 2);

        let parse = Memoize::<&str, u32>::builder()
            .build()
            .wrap(|args: &[&str]| args[0].parse::<u32>());
        assert_eq!(parse.try_call(&["12"]), Ok(12));
        assert!(parse.try_call(&["x"]).is_err());
        assert_eq!(parse.memoize().len(), 1);
    }

    #[test]
    fn invalidate_and_clear() {
        let memo = Memoize::<u8, u8>::builder().build();
        memo.call(&[1], |_| 1);
        memo.call(&[2], |_| 2);
        assert!(memo.invalidate(&[1]));
        assert!(!memo.invalidate(&[1]));
        assert_eq!(memo.call(&[1], |_| 10), 10);
        memo.clear();
        assert!(memo.is_empty());
    }

    #[test]
    fn locked_serializes_calls() {
        let memo = Memoize::<u32, u32>::builder().locked(true).build();
        assert!(memo.is_locked());
        let running = AtomicBool::new(false);
        let overlaps = AtomicUsize::new(0);
        let calls = AtomicUsize::new(0);

        thread::scope(|scope| {
            for i in 0..8u32 {
                let (memo, running, overlaps, calls) = (&memo, &running, &overlaps, &calls);
                scope.spawn(move || {
                    // Half the threads share a key, the rest use their own.
                    let key = if i % 2 == 0 { 0 } else { i };
                    memo.call(&[key], |_| {
                        if running.swap(true, Ordering::SeqCst) {
                            overlaps.fetch_add(1, Ordering::SeqCst);
                        }
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(10));
                        running.store(false, Ordering::SeqCst);
                        key
                    });
                });
            }
        });

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
        // One call for the shared key plus one per odd key.
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn unlocked_allows_concurrent_misses() {
        let memo = Memoize::<u32, u32>::builder().build();
        let barrier = Barrier::new(2);
        let calls = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..2 {
                let (memo, barrier, calls) = (&memo, &barrier, &calls);
                scope.spawn(move || {
                    memo.call(&[1], |_| {
                        // Both callers are inside the operation at once.
                        barrier.wait();
                        calls.fetch_add(1, Ordering::SeqCst) as u32
                    })
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn locked_survives_panic() {
        let memo = Memoize::<u8, u8>::builder().locked(true).build();
        let result = catch_unwind(AssertUnwindSafe(|| memo.call(&[1], |_| panic!("boom"))));
        assert!(result.is_err());
        assert!(memo.is_empty());
        assert_eq!(memo.call(&[1], |_| 2), 2);
    }

    #[test]
    fn logs_hits_and_misses() {
        let logger = StringLogger::default();
        let memo = Memoize::<u8, u8>::builder()
            .name("sqs")
            .logger(logger.clone())
            .expiry_time(Duration::from_millis(30))
            .build();
        memo.call(&[1], |_| 1);
        memo.call(&[1], |_| 1);
        thread::sleep(Duration::from_millis(50));
        memo.call(&[1], |_| 1);
        assert_eq!(logger.lines(), vec!["sqs: miss", "sqs: hit", "sqs: expired"]);
    }

    #[test]
    fn options_from_config() {
        let wad_config = WadConfig::builder()
            .toml_str(
                r#"
                [memoize.sqs]
                expiry_time = 600
                num_args = 1
                locked = true
                "#,
            )
            .build()
            .expect("memoize_options.toml");
        let options = wad_config.memoize_options("sqs").expect("sqs options");
        assert_eq!(
            options,
            MemoizeOptions {
                expiry_time: 600,
                num_args: Some(1),
                locked: true,
            }
        );
        assert_eq!(
            wad_config.memoize_options("dropbox").expect("defaults"),
            MemoizeOptions::default()
        );

        let memo = Memoize::<u8, u8>::builder().options(&options).build();
        assert!(memo.is_locked());
        assert_eq!(memo.expiry_time(), Duration::from_secs(600));
        assert_eq!(memo.num_args(), Some(1));

        let toml = toml::to_string(&MemoizeOptions::default()).expect("serialize");
        assert!(toml.trim().is_empty());
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn async_locked_connects_once() {
        use crate::memoize::AsyncMemoize;
        use std::sync::Arc;

        let memo = Arc::new(
            AsyncMemoize::<String, u32>::builder()
                .locked(true)
                .expiry_secs(600)
                .build_async(),
        );
        let calls = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let (memo, calls) = (memo.clone(), calls.clone());
            handles.push(tokio::spawn(async move {
                memo.call(&["orders".to_string()], move || async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    calls.fetch_add(1, Ordering::SeqCst) as u32
                })
                .await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.expect("join"), 0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let failed: Result<u32, Error> = memo
            .try_call(&["billing".to_string()], || async {
                Err(Error::Remote("timeout".to_string()))
            })
            .await;
        assert!(failed.is_err());
        assert_eq!(memo.len(), 1);
    }

    #[cfg(feature = "tokio")]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn async_unlocked_allows_concurrent_misses() {
        use crate::memoize::AsyncMemoize;
        use std::sync::Arc;
        use tokio::sync::Barrier;

        let memo = Arc::new(AsyncMemoize::<u32, u32>::builder().build_async());
        assert!(!memo.is_locked());
        let barrier = Arc::new(Barrier::new(2));
        let calls = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let (memo, barrier, calls) = (memo.clone(), barrier.clone(), calls.clone());
                tokio::spawn(async move {
                    memo.call(&[1], move || async move {
                        // Both callers are inside the operation at once.
                        barrier.wait().await;
                        calls.fetch_add(1, Ordering::SeqCst) as u32
                    })
                    .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.expect("join");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(memo.len(), 1);
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn async_traces_to_the_callers_logger() {
        use crate::memoize::AsyncMemoize;

        let cache_logger = StringLogger::default();
        let memo = AsyncMemoize::<u8, u8>::builder()
            .name("s3")
            .logger(cache_logger.clone())
            .build_async();
        let call_logger = StringLogger::default();
        let value: Result<u8, Error> = memo
            .try_call_logged(&[1], &call_logger, || async { Ok(7) })
            .await;
        assert_eq!(value.ok(), Some(7));
        assert_eq!(call_logger.lines(), vec!["s3: miss"]);
        assert!(cache_logger.is_empty());

        assert_eq!(memo.call(&[1], || async { 0 }).await, 7);
        assert_eq!(cache_logger.lines(), vec!["s3: hit"]);
    }
}
