//! LCS table construction and backtracking
//!
//! The same table builder and walker serve both line and character
//! granularity. Units are compared through a caller-supplied predicate so the
//! normalized projection never leaks into the output.

/// A single step of an edit script, expressed as indices into the inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Equal { left: usize, right: usize },
    Delete { left: usize },
    Insert { right: usize },
}

impl EditOp {
    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal { .. })
    }
}

/// Number of cells an `(m+1) x (n+1)` table needs
pub fn table_cells(left_len: usize, right_len: usize) -> u64 {
    (left_len as u64 + 1).saturating_mul(right_len as u64 + 1)
}

/// Dynamic-programming table of LCS lengths.
///
/// Stored as one flat buffer indexed `i * (n + 1) + j`. Cell values are bounded
/// by `min(m, n)`, so `u32` is enough for any table that fits in memory.
#[derive(Debug, Clone)]
pub struct LcsTable {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    /// Build the table for `left` and `right` using `eq` as the unit predicate
    pub fn build<L, R, F>(left: &[L], right: &[R], eq: F) -> Self
    where
        F: Fn(&L, &R) -> bool,
    {
        let rows = left.len() + 1;
        let cols = right.len() + 1;
        let mut cells = vec![0u32; rows * cols];

        for i in 1..rows {
            for j in 1..cols {
                let value = if eq(&left[i - 1], &right[j - 1]) {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    cells[(i - 1) * cols + j].max(cells[i * cols + (j - 1)])
                };
                cells[i * cols + j] = value;
            }
        }

        Self { rows, cols, cells }
    }

    /// Cell lookup. Anything outside the table reads as zero.
    pub fn get(&self, i: usize, j: usize) -> u32 {
        if i >= self.rows || j >= self.cols {
            return 0;
        }
        self.cells.get(i * self.cols + j).copied().unwrap_or(0)
    }

    /// Length of the longest common subsequence
    pub fn lcs_len(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1) as usize
    }

    /// Walk from the bottom-right corner back to the origin and return the
    /// edit script in forward order.
    ///
    /// Equal units always move diagonally. On a tie between the upper and the
    /// left neighbour the walk steps left first, which places the deletion
    /// ahead of the competing insertion once the script is reversed.
    pub fn backtrack<L, R, F>(&self, left: &[L], right: &[R], eq: F) -> Vec<EditOp>
    where
        F: Fn(&L, &R) -> bool,
    {
        let mut ops = Vec::with_capacity(left.len().max(right.len()));
        let mut i = left.len().min(self.rows - 1);
        let mut j = right.len().min(self.cols - 1);

        while i > 0 || j > 0 {
            if i > 0 && j > 0 && eq(&left[i - 1], &right[j - 1]) {
                ops.push(EditOp::Equal {
                    left: i - 1,
                    right: j - 1,
                });
                i -= 1;
                j -= 1;
            } else if j > 0 && (i == 0 || self.get(i, j - 1) >= self.get(i - 1, j)) {
                ops.push(EditOp::Insert { right: j - 1 });
                j -= 1;
            } else {
                ops.push(EditOp::Delete { left: i - 1 });
                i -= 1;
            }
        }

        ops.reverse();
        ops
    }
}

/// Build the table and backtrack in one go
pub fn diff_by<L, R, F>(left: &[L], right: &[R], eq: F) -> Vec<EditOp>
where
    F: Fn(&L, &R) -> bool,
{
    let table = LcsTable::build(left, right, &eq);
    tracing::trace!(
        rows = left.len(),
        cols = right.len(),
        lcs = table.lcs_len(),
        "built lcs table"
    );
    table.backtrack(left, right, eq)
}
