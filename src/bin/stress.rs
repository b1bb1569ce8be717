use ringq::control::{ControlError, ControlHandler, MemPort};
use ringq::ring::SharedRing;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const CAPACITY: i32 = 64 * 1024;
const CHUNK: usize = 64;
const PRODUCERS: u8 = 2;

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("ringq stress: {} producers + 1 blocking consumer\n", PRODUCERS);

    let running = Arc::new(AtomicBool::new(true));
    let ring = Arc::new(SharedRing::new());
    let handler = ControlHandler::new(Arc::clone(&ring));
    handler.set_size(CAPACITY)?;

    {
        let r = running.clone();
        let ring = Arc::clone(&ring);
        ctrlc::set_handler(move || {
            r.store(false, Ordering::SeqCst);
            ring.interrupt();
        })?;
    }

    let start = Instant::now();

    let (total_pushed, total_popped) = std::thread::scope(|scope| {
        let mut producers = Vec::new();
        for p in 0..PRODUCERS {
            let handler = handler.clone();
            let running = running.clone();
            producers.push(scope.spawn(move || {
                let payload = [b'A' + p; CHUNK];
                let mut pushed = 0u64;
                while running.load(Ordering::Relaxed) {
                    let mut source = MemPort::source(&payload);
                    match handler.push(CHUNK as i32, &mut source) {
                        Ok(n) => pushed += n as u64,
                        Err(ControlError::OutOfSpace { .. }) => std::thread::yield_now(),
                        Err(_) => break,
                    }
                }
                pushed
            }));
        }

        let consumer = {
            let handler = handler.clone();
            let running = running.clone();
            scope.spawn(move || {
                let mut popped = 0u64;
                loop {
                    let mut sink = MemPort::sink();
                    match handler.pop(4096, &mut sink) {
                        Ok(n) => popped += n as u64,
                        Err(ControlError::Interrupted) => {
                            if !running.load(Ordering::Relaxed) {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
                popped
            })
        };

        println!("Running for 5 seconds...");
        let deadline = Instant::now() + Duration::from_secs(5);
        while running.load(Ordering::Relaxed) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
        }
        running.store(false, Ordering::SeqCst);

        let pushed: u64 = producers.into_iter().map(|p| p.join().unwrap()).sum();

        // Let the consumer drain what is left, then kick it out of its
        // final blocking pop.
        while !consumer.is_finished() {
            ring.interrupt();
            std::thread::sleep(Duration::from_millis(10));
        }
        (pushed, consumer.join().unwrap())
    });

    let elapsed = start.elapsed().as_secs_f64();

    println!("\nResults:");
    println!("  Pushed: {} bytes", total_pushed);
    println!("  Popped: {} bytes", total_popped);
    println!(
        "  Throughput: {:.2} MB/s",
        total_pushed as f64 / elapsed / (1024.0 * 1024.0)
    );

    Ok(())
}
