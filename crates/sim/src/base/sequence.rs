use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use super::{Nucleotide, Window};
use crate::errors::InvalidSequence;

/// Mutable DNA sequence with a per-base "mutated" mark.
///
/// `Sequence` stores its bases as a vector of `Nucleotide`s together with a
/// parallel boolean mask. A position is marked when a mutation operator
/// produced it (a substituted base, inserted bases, an inverted window, a
/// duplicated or translocated copy). The mask replaces the old convention of
/// upper-casing freshly mutated bases while keeping untouched bases in lower
/// case; [`Sequence::marked`] renders that convention for inspection.
///
/// The two vectors always have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence {
    bases: Vec<Nucleotide>,
    mutated: Vec<bool>,
}

impl Sequence {
    /// Create a new, empty `Sequence`.
    ///
    /// ```rust
    /// # use variantize_sim::base::Sequence;
    /// let seq = Sequence::new();
    /// assert_eq!(seq.len(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `Sequence` with reserved capacity for `capacity` bases.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bases: Vec::with_capacity(capacity),
            mutated: Vec::with_capacity(capacity),
        }
    }

    /// Create an unmarked `Sequence` from a vector of `Nucleotide`s.
    pub fn from_nucleotides(bases: Vec<Nucleotide>) -> Self {
        let mutated = vec![false; bases.len()];
        Self { bases, mutated }
    }

    /// Parse text where upper-case letters denote mutated positions and
    /// lower-case letters untouched ones. Inverse of [`Sequence::marked`].
    pub fn from_marked_str(s: &str) -> Result<Self, InvalidSequence> {
        let mut seq = Self::with_capacity(s.len());
        for (position, ch) in s.chars().enumerate() {
            let base = nucleotide_at(ch, position)?;
            seq.bases.push(base);
            seq.mutated.push(ch.is_ascii_uppercase());
        }
        Ok(seq)
    }

    /// Return the length of the sequence in bases.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Return `true` if the sequence contains no bases.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Return the `Nucleotide` at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Nucleotide> {
        self.bases.get(index).copied()
    }

    /// Whether the base at `index` was produced by a mutation.
    #[inline]
    pub fn is_mutated(&self, index: usize) -> bool {
        self.mutated.get(index).copied().unwrap_or(false)
    }

    /// Borrow the underlying `Nucleotide` slice.
    #[inline]
    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.bases
    }

    /// Borrow the mutation mask.
    #[inline]
    pub fn mutation_mask(&self) -> &[bool] {
        &self.mutated
    }

    /// Append an untouched base.
    #[inline]
    pub fn push(&mut self, base: Nucleotide) {
        self.bases.push(base);
        self.mutated.push(false);
    }

    /// Append a base produced by a mutation.
    #[inline]
    pub fn push_mutated(&mut self, base: Nucleotide) {
        self.bases.push(base);
        self.mutated.push(true);
    }

    /// Replace the base at `index` and mark it as mutated.
    ///
    /// Panics if `index` is out of bounds (matching slice indexing).
    #[inline]
    pub fn substitute(&mut self, index: usize, base: Nucleotide) {
        self.bases[index] = base;
        self.mutated[index] = true;
    }

    /// Append the bases at `range` of `src`, carrying over their marks.
    ///
    /// Panics if `range` is out of bounds for `src`.
    #[inline]
    pub fn extend_from(&mut self, src: &Sequence, range: Range<usize>) {
        self.bases.extend_from_slice(&src.bases[range.clone()]);
        self.mutated.extend_from_slice(&src.mutated[range]);
    }

    /// Append the bases at `range` of `src`, marking every one as mutated.
    #[inline]
    pub fn extend_mutated_from(&mut self, src: &Sequence, range: Range<usize>) {
        let added = range.len();
        self.bases.extend_from_slice(&src.bases[range]);
        self.mutated.resize(self.mutated.len() + added, true);
    }

    /// Append the reverse complement of `range` of `src`, marked as mutated.
    pub fn extend_reverse_complement_from(&mut self, src: &Sequence, range: Range<usize>) {
        let added = range.len();
        self.bases
            .extend(src.bases[range].iter().rev().map(|b| b.complement()));
        self.mutated.resize(self.mutated.len() + added, true);
    }

    /// Reverse complement of the whole sequence, fully marked.
    pub fn reverse_complement(&self) -> Sequence {
        let mut out = Sequence::with_capacity(self.len());
        out.extend_reverse_complement_from(self, 0..self.len());
        out
    }

    /// Remove every base, keeping the allocation.
    pub fn clear(&mut self) {
        self.bases.clear();
        self.mutated.clear();
    }

    /// Drop every mutation mark.
    pub fn clear_marks(&mut self) {
        self.mutated.fill(false);
    }

    /// Number of marked positions.
    pub fn mutated_count(&self) -> usize {
        self.mutated.iter().filter(|&&m| m).count()
    }

    /// Maximal runs of marked positions, in order.
    pub fn mutated_spans(&self) -> Vec<Window> {
        let mut spans = Vec::new();
        let mut open: Option<usize> = None;
        for (i, &m) in self.mutated.iter().enumerate() {
            match (m, open) {
                (true, None) => open = Some(i),
                (false, Some(start)) => {
                    spans.push(Window::new(start, i - start));
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(start) = open {
            spans.push(Window::new(start, self.len() - start));
        }
        spans
    }

    /// Render with untouched bases in lower case and mutated bases in upper case.
    pub fn marked(&self) -> String {
        self.bases
            .iter()
            .zip(&self.mutated)
            .map(|(b, &m)| {
                if m {
                    b.to_ascii() as char
                } else {
                    b.to_ascii_lowercase() as char
                }
            })
            .collect()
    }
}

#[inline]
fn nucleotide_at(ch: char, position: usize) -> Result<Nucleotide, InvalidSequence> {
    u8::try_from(ch)
        .ok()
        .and_then(Nucleotide::from_ascii)
        .ok_or(InvalidSequence::InvalidChar { ch, position })
}

impl fmt::Display for Sequence {
    /// Upper-case rendering, the form written to output files.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &nuc in &self.bases {
            write!(f, "{}", nuc.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Sequence {
    type Err = InvalidSequence;

    /// Parse a textual representation (e.g. "ACGT") into an unmarked `Sequence`.
    ///
    /// Case is ignored, so the result is the same as parsing the lower-cased
    /// input. Characters outside the DNA alphabet produce an error naming the
    /// first offending position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bases = s
            .chars()
            .enumerate()
            .map(|(position, ch)| nucleotide_at(ch, position))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_nucleotides(bases))
    }
}
