use crate::poller::worker::RunSignal;
use crate::queue::ConcurrentQueue;
use loom::sync::Arc;
use std::time::Duration;

fn drain(queue: &ConcurrentQueue<usize>) -> Vec<usize> {
    std::iter::from_fn(|| queue.try_dequeue()).collect()
}

#[test]
fn loom_fifo_between_producer_and_consumer() {
    loom::model(|| {
        let queue = ConcurrentQueue::new();
        let producer = queue.clone();

        let th = loom::thread::spawn(move || {
            producer.enqueue(0);
            producer.enqueue(1);
        });

        let mut got = Vec::new();

        while got.len() < 2 {
            match queue.try_dequeue() {
                Some(item) => got.push(item),
                None => loom::thread::yield_now(),
            }
        }

        th.join().unwrap();

        assert_eq!(got, vec![0, 1]);
        assert!(queue.is_empty());
    });
}

#[test]
fn loom_concurrent_producers_deliver_exactly_once() {
    loom::model(|| {
        let queue = ConcurrentQueue::new();

        let producers: Vec<_> = (0..2)
            .map(|p| {
                let queue = queue.clone();

                loom::thread::spawn(move || queue.enqueue(p))
            })
            .collect();

        for producer in producers {
            producer.join().unwrap();
        }

        let mut got = drain(&queue);

        got.sort_unstable();

        assert_eq!(got, vec![0, 1]);
    });
}

#[test]
fn loom_stop_request_is_observed() {
    loom::model(|| {
        let queue = ConcurrentQueue::new();
        let signal = Arc::new(RunSignal::new());

        let th = {
            let queue = queue.clone();
            let signal = signal.clone();

            loom::thread::spawn(move || {
                let mut got = Vec::new();

                while !signal.is_stop_requested() {
                    match queue.try_dequeue() {
                        Some(item) => got.push(item),
                        None => loom::thread::yield_now(),
                    }
                }

                got
            })
        };

        queue.enqueue(1);

        assert!(signal.request_stop());
        assert!(!signal.request_stop());

        let mut got = th.join().unwrap();

        // Whatever the worker did not take is still queued.
        got.extend(drain(&queue));

        assert_eq!(got, vec![1]);
    });
}

#[test]
fn loom_stop_wakes_a_blocked_dequeue() {
    loom::model(|| {
        let queue = ConcurrentQueue::<usize>::new();
        let signal = Arc::new(RunSignal::new());

        let th = {
            let queue = queue.clone();
            let signal = signal.clone();

            loom::thread::spawn(move || {
                queue.wait_dequeue(Duration::from_secs(3600), || signal.is_stop_requested())
            })
        };

        signal.request_stop();
        queue.notify_all();

        assert_eq!(th.join().unwrap(), None);
    });
}
