use crate::generic_queue::GenericQueue;
use criterion::{criterion_group, criterion_main, Criterion};
use queue_poller::{handler_fn, ConcurrentQueue, IdleStrategy, Poller, PollerConfig};
use std::hint::spin_loop;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

pub(crate) mod generic_queue;

// Single-threaded benchmark.
//
// `N` items are pushed and then popped from the queue.
pub fn push_pop<Q: GenericQueue<usize>, const N: usize>(name: &str, c: &mut Criterion) {
    let queue = Q::new();

    c.bench_function(&format!("push_pop-{name}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                for i in 0..N {
                    queue.push(i);
                }

                for _ in 0..N {
                    let _ = queue.pop();
                }
            }

            start.elapsed() / N as _
        });
    });
}

// Multi-threaded benchmark.
//
// `PRODUCERS` threads push `N` items each while the current thread pops all of them.
pub fn multi_producer<Q: GenericQueue<usize> + 'static, const PRODUCERS: usize, const N: usize>(
    name: &str,
    c: &mut Criterion,
) {
    c.bench_function(&format!("multi_producer-{name}"), |b| {
        b.iter_custom(|iters| {
            let queue = Q::new();
            let start = Instant::now();

            for _ in 0..iters {
                let producers: Vec<_> = (0..PRODUCERS)
                    .map(|_| {
                        let queue = queue.clone();

                        thread::spawn(move || {
                            for i in 0..N {
                                queue.push(i);
                            }
                        })
                    })
                    .collect();

                let mut popped = 0;

                while popped < PRODUCERS * N {
                    if queue.pop().is_some() {
                        popped += 1;
                    } else {
                        spin_loop();
                    }
                }

                for producer in producers {
                    producer.join().unwrap();
                }
            }

            start.elapsed() / (PRODUCERS * N) as _
        });
    });
}

// End-to-end benchmark.
//
// `N` items are enqueued and the time until the handler has seen all of them is measured.
pub fn enqueue_to_handler<const N: u64>(name: &str, idle_strategy: IdleStrategy, c: &mut Criterion) {
    let handled = Arc::new(AtomicU64::new(0));
    let handled_by_handler = handled.clone();
    let poller = Poller::with_config(
        handler_fn(move |_: u64| {
            handled_by_handler.fetch_add(1, Ordering::Release);
        }),
        PollerConfig::default().with_idle_strategy(idle_strategy),
    );
    let producer: ConcurrentQueue<u64> = poller.queue();

    poller.start_listening().unwrap();

    c.bench_function(&format!("enqueue_to_handler-{name}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let target = handled.load(Ordering::Acquire) + N;

                for i in 0..N {
                    producer.enqueue(i);
                }

                while handled.load(Ordering::Acquire) < target {
                    spin_loop();
                }
            }

            start.elapsed() / N as _
        });
    });

    poller.stop_listening().join().unwrap();
}

// region push_pop

pub fn push_pop_small_concurrent_queue(c: &mut Criterion) {
    push_pop::<ConcurrentQueue<_>, 8>("small-concurrent_queue", c);
}

pub fn push_pop_small_crossbeam_seg_queue(c: &mut Criterion) {
    push_pop::<Arc<crossbeam_queue::SegQueue<_>>, 8>("small-crossbeam_seg_queue", c);
}

pub fn push_pop_large_concurrent_queue(c: &mut Criterion) {
    push_pop::<ConcurrentQueue<_>, 256>("large-concurrent_queue", c);
}

pub fn push_pop_large_crossbeam_seg_queue(c: &mut Criterion) {
    push_pop::<Arc<crossbeam_queue::SegQueue<_>>, 256>("large-crossbeam_seg_queue", c);
}

// endregion

// region multi_producer

pub fn multi_producer_concurrent_queue(c: &mut Criterion) {
    multi_producer::<ConcurrentQueue<_>, 4, 1024>("concurrent_queue", c);
}

pub fn multi_producer_crossbeam_seg_queue(c: &mut Criterion) {
    multi_producer::<Arc<crossbeam_queue::SegQueue<_>>, 4, 1024>("crossbeam_seg_queue", c);
}

// endregion

// region enqueue_to_handler

pub fn enqueue_to_handler_busy_spin(c: &mut Criterion) {
    enqueue_to_handler::<256>("busy_spin", IdleStrategy::BusySpin, c);
}

pub fn enqueue_to_handler_backoff(c: &mut Criterion) {
    enqueue_to_handler::<256>("backoff", IdleStrategy::Backoff, c);
}

pub fn enqueue_to_handler_block(c: &mut Criterion) {
    enqueue_to_handler::<256>("block", IdleStrategy::block(), c);
}

// endregion

criterion_group!(
    queue_benchmark,
    push_pop_small_concurrent_queue,
    push_pop_small_crossbeam_seg_queue,
    push_pop_large_concurrent_queue,
    push_pop_large_crossbeam_seg_queue,
    multi_producer_concurrent_queue,
    multi_producer_crossbeam_seg_queue
);

criterion_group!(
    poller_benchmark,
    enqueue_to_handler_busy_spin,
    enqueue_to_handler_backoff,
    enqueue_to_handler_block
);

criterion_main!(queue_benchmark, poller_benchmark);
