//! A square bitboard sized at runtime.
//!
//! Boards are an `N×N` grid packed row-major into a vector of unsigned words
//! `T`. The word type is generic so small boards can stay in a single `u64`
//! while larger ones spill over into additional words.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{BitAnd, BitOr, Not, Sub};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::Cell;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Column or row index is out of bounds [0..N).
    IndexOutOfBounds { x: usize, y: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { x, y } => {
                write!(f, "IndexOutOfBounds: x={}, y={}", x, y)
            }
        }
    }
}

/// An N×N bitboard stored in words of type `T`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitBoard<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    size: usize,
    words: Vec<T>,
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    /// Create an empty `size×size` board.
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        let words = cells.div_ceil(Self::WORD_BITS);
        BitBoard {
            size,
            words: vec![T::zero(); words],
        }
    }

    /// Create a board with every cell set.
    pub fn full(size: usize) -> Self {
        let mut board = Self::new(size);
        board.fill();
        board
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn locate(&self, cell: Cell) -> Result<(usize, usize), BitBoardError> {
        if !cell.in_bounds(self.size) {
            return Err(BitBoardError::IndexOutOfBounds {
                x: cell.x,
                y: cell.y,
            });
        }
        let idx = cell.y * self.size + cell.x;
        Ok((idx / Self::WORD_BITS, idx % Self::WORD_BITS))
    }

    /// Gets the bit at `cell`.
    pub fn get(&self, cell: Cell) -> Result<bool, BitBoardError> {
        let (w, b) = self.locate(cell)?;
        Ok(((self.words[w] >> b) & T::one()) != T::zero())
    }

    /// Like [`get`](Self::get) but treats out-of-bounds cells as unset.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.get(cell).unwrap_or(false)
    }

    /// Sets the bit at `cell` to 1.
    pub fn set(&mut self, cell: Cell) -> Result<(), BitBoardError> {
        let (w, b) = self.locate(cell)?;
        self.words[w] = self.words[w] | (T::one() << b);
        Ok(())
    }

    /// Clears the bit at `cell` to 0.
    pub fn clear(&mut self, cell: Cell) -> Result<(), BitBoardError> {
        let (w, b) = self.locate(cell)?;
        self.words[w] = self.words[w] & !(T::one() << b);
        Ok(())
    }

    /// Sets all board bits to `1`.
    pub fn fill(&mut self) {
        for word in self.words.iter_mut() {
            *word = !T::zero();
        }
        self.trim_tail();
    }

    /// Clears all bits to `0`.
    pub fn clear_all(&mut self) {
        for word in self.words.iter_mut() {
            *word = T::zero();
        }
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Creates a board from an iterator over cells.
    pub fn from_cells<I>(size: usize, cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut board = Self::new(size);
        for cell in cells {
            board.set(cell)?;
        }
        Ok(board)
    }

    /// Iterator over the set cells in row-major order.
    pub fn iter_set_bits(&self) -> SetBits<'_, T> {
        SetBits { board: self, idx: 0 }
    }

    // Bits past size*size in the last word must stay zero so that counts
    // and equality only see real cells.
    fn trim_tail(&mut self) {
        let used = (self.size * self.size) % Self::WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = *last & ((T::one() << used) - T::one());
            }
        }
    }

    fn zip_with(&self, rhs: &Self, op: impl Fn(T, T) -> T) -> Self {
        debug_assert_eq!(self.size, rhs.size, "bitboards of different sizes");
        let words = self
            .words
            .iter()
            .zip(rhs.words.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
        BitBoard {
            size: self.size,
            words,
        }
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", self.size)?;
        fmt::Display::fmt(self, f)
    }
}

impl<T> fmt::Display for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let bit = if self.contains(Cell::new(x, y)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if y + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set bits of a bitboard.
#[derive(Clone)]
pub struct SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T>,
    idx: usize,
}

impl<T> Iterator for SetBits<'_, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.board.size;
        while self.idx < n * n {
            let idx = self.idx;
            self.idx += 1;
            let word = self.board.words[idx / BitBoard::<T>::WORD_BITS];
            if ((word >> (idx % BitBoard::<T>::WORD_BITS)) & T::one()) != T::zero() {
                return Some(Cell::new(idx % n, idx / n));
            }
        }
        None
    }
}

impl<T> BitAnd for &BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn bitand(self, rhs: Self) -> BitBoard<T> {
        self.zip_with(rhs, |a, b| a & b)
    }
}

impl<T> BitOr for &BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn bitor(self, rhs: Self) -> BitBoard<T> {
        self.zip_with(rhs, |a, b| a | b)
    }
}

/// Set difference: cells in `self` that are not in `rhs`.
impl<T> Sub for &BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn sub(self, rhs: Self) -> BitBoard<T> {
        self.zip_with(rhs, |a, b| a & !b)
    }
}

/// Bitwise NOT within board bounds.
impl<T> Not for &BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn not(self) -> BitBoard<T> {
        let mut out = BitBoard {
            size: self.size,
            words: self.words.iter().map(|&w| !w).collect(),
        };
        out.trim_tail();
        out
    }
}
