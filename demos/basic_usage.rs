//! Walkthrough of the deque API: pushes at both ends, iteration,
//! conversion to a vector, and draining until empty.

use ringdeque::RingDeque;

fn main() {
    let mut deque = RingDeque::new();

    deque.push_front(1);
    deque.push_back(2);
    println!("after push_front(1) and push_back(2): len = {}", deque.len());

    print!("front to back:");
    for value in &deque {
        print!(" {value}");
    }
    println!();

    println!("as a vector: {:?}", deque.to_vec());

    println!("pop_front -> {:?}", deque.pop_front());
    println!("pop_back  -> {:?}", deque.pop_back());
    println!("pop_front -> {:?}", deque.pop_front());

    // The allocation follows the occupancy in both directions.
    let mut window: RingDeque<u32> = RingDeque::new();
    for i in 0..100 {
        window.push_back(i);
    }
    println!(
        "after 100 pushes: len = {}, capacity = {}",
        window.len(),
        window.capacity()
    );

    while window.len() > 10 {
        window.pop_front();
    }
    println!(
        "drained to {} elements: capacity = {}",
        window.len(),
        window.capacity()
    );
}
