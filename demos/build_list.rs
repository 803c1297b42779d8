use single_linked_list::{swap, LinkedList};

// cargo run --example build_list
fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut list = LinkedList::from([3, 1, 4, 1, 5]);
    println!("built: {:?} (len {})", list, list.len());

    let mut pos = list.before_begin();
    while !list.next(pos).is_end() {
        pos = list.next(pos);
    }
    list.insert_after(pos, 9);
    list.erase_after(list.begin());
    println!("edited: {:?}", list);

    list.reverse();
    println!("reversed: {:?}", list);

    let mut other = list.clone();
    other.push_front(2);
    swap(&mut list, &mut other);
    println!("swapped: {:?} / {:?}, first < second: {}", list, other, list < other);

    list.clear();
    println!("cleared: {:?}, empty: {}", list, list.is_empty());
}
