use broadside::{BitBoard, BitBoardError, Cell};

#[test]
fn test_out_of_bounds() {
    let mut bb = BitBoard::<u64>::new(4);
    let err = bb.set(Cell::new(4, 0));
    assert_eq!(err, Err(BitBoardError::IndexOutOfBounds { x: 4, y: 0 }));
    assert!(bb.get(Cell::new(0, 9)).is_err());
    assert!(!bb.contains(Cell::new(0, 9)));
}

#[test]
fn test_get_set_clear() {
    let mut bb = BitBoard::<u16>::new(4);
    assert!(bb.is_empty());

    bb.set(Cell::new(1, 1)).unwrap();
    assert!(bb.get(Cell::new(1, 1)).unwrap());

    bb.clear(Cell::new(1, 1)).unwrap();
    assert!(!bb.get(Cell::new(1, 1)).unwrap());

    bb.set(Cell::new(2, 3)).unwrap();
    assert!(bb.get(Cell::new(2, 3)).unwrap());
    assert_eq!(bb.count_ones(), 1);
}

#[test]
fn test_words_span_boundaries() {
    // 10x10 in u8 words: cells well past the first word must round-trip.
    let mut bb = BitBoard::<u8>::new(10);
    for cell in [Cell::new(7, 0), Cell::new(8, 0), Cell::new(9, 9)] {
        bb.set(cell).unwrap();
    }
    let bits: Vec<_> = bb.iter_set_bits().collect();
    assert_eq!(bits, vec![Cell::new(7, 0), Cell::new(8, 0), Cell::new(9, 9)]);
}

#[test]
fn test_from_cells_and_iter() {
    let bb = BitBoard::<u16>::from_cells(4, [Cell::new(3, 3), Cell::new(0, 1)]).unwrap();
    let bits: Vec<_> = bb.iter_set_bits().collect();
    assert_eq!(bits, vec![Cell::new(0, 1), Cell::new(3, 3)]);
}

#[test]
fn test_full_and_not_stay_inside_board() {
    let full = BitBoard::<u64>::full(3);
    assert_eq!(full.count_ones(), 9);
    let none = !&full;
    assert!(none.is_empty());

    let empty = BitBoard::<u64>::new(3);
    assert_eq!((!&empty).count_ones(), 9);
}

#[test]
fn test_set_operations() {
    let a = BitBoard::<u64>::from_cells(5, [Cell::new(0, 0), Cell::new(1, 0)]).unwrap();
    let b = BitBoard::<u64>::from_cells(5, [Cell::new(1, 0), Cell::new(2, 0)]).unwrap();
    assert_eq!((&a & &b).iter_set_bits().collect::<Vec<_>>(), vec![Cell::new(1, 0)]);
    assert_eq!((&a | &b).count_ones(), 3);
    assert_eq!((&a - &b).iter_set_bits().collect::<Vec<_>>(), vec![Cell::new(0, 0)]);
}
