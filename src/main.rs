use ringq::control::{ControlError, ControlHandler, MemPort};
use ringq::ring::SharedRing;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

const CAPACITY: i32 = 4096;
const CHUNK: usize = 64;

fn main() {
    tracing_subscriber::fmt::init();
    info!("ringq v0.1.0, press Ctrl+C to stop");

    let running = Arc::new(AtomicBool::new(true));
    let ring = Arc::new(SharedRing::new());
    let handler = ControlHandler::new(Arc::clone(&ring));

    {
        let running = Arc::clone(&running);
        let ring = Arc::clone(&ring);
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
            ring.interrupt();
        })
        .expect("Failed to set Ctrl+C handler");
    }

    match handler.set_size(CAPACITY) {
        Ok(()) => info!(capacity = CAPACITY, "queue size set"),
        Err(e) => {
            error!("SetSize failed: {e}");
            std::process::exit(1);
        }
    }

    let consumer = {
        let handler = handler.clone();
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut popped = 0u64;
            while running.load(Ordering::SeqCst) {
                let mut sink = MemPort::sink();
                match handler.pop(CHUNK as i32, &mut sink) {
                    Ok(n) => popped += n as u64,
                    Err(ControlError::Interrupted) => continue,
                    Err(e) => {
                        error!("pop failed: {e}");
                        break;
                    }
                }
            }
            popped
        })
    };

    let payload = [0x5a_u8; CHUNK];
    let mut pushed = 0u64;
    let mut rejected = 0u64;
    let mut last_report = Instant::now();

    while running.load(Ordering::SeqCst) {
        let mut source = MemPort::source(&payload);
        match handler.push(CHUNK as i32, &mut source) {
            Ok(n) => pushed += n as u64,
            Err(ControlError::OutOfSpace { .. }) => rejected += 1,
            Err(e) => {
                error!("push failed: {e}");
                break;
            }
        }

        if last_report.elapsed() >= Duration::from_secs(5) {
            if let Some(status) = ring.status() {
                info!(
                    pushed,
                    rejected,
                    used = status.used,
                    available = status.available,
                    "status"
                );
            }
            last_report = Instant::now();
        }

        thread::sleep(Duration::from_millis(10));
    }

    running.store(false, Ordering::SeqCst);
    // The consumer may be blocked on an empty queue; keep kicking it until
    // it has observed the shutdown.
    while !consumer.is_finished() {
        ring.interrupt();
        thread::sleep(Duration::from_millis(10));
    }
    let popped = consumer.join().unwrap();

    info!(pushed, popped, "shut down");
}
