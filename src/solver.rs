//! Dancing-links exact cover solver.
//!
//! The constraint matrix is stored as a toroidal web of doubly-linked nodes:
//! - every column has a header with a live size count, and the headers form a
//!   circular list through a root sentinel
//! - every `true` matrix cell is a node linked into its column (vertically)
//!   and into its row (horizontally)
//!
//! Nodes live in one arena and refer to each other by index. Covering a
//! column unlinks it and every row that conflicts with it, but leaves the
//! unlinked nodes' own links untouched, so uncovering in exactly the reverse
//! order restores the web.
//!
//! The search is iterative with an explicit stack of frames, one per chosen
//! column, so deep problems cannot overflow the call stack.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::matrix::ConstraintMatrix;

/// Row index stored in header and root nodes.
const NO_ROW: usize = usize::MAX;

/// How the next column to branch on is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnSelection {
    /// The live column with the fewest rows; ties go to the leftmost column.
    #[default]
    MinimumSize,
    /// Always the leftmost live column.
    FirstAvailable,
}

/// Search configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub selection: ColumnSelection,
    /// Stop after this many solutions. `None` enumerates all of them.
    pub max_solutions: Option<usize>,
}

/// Why a search returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Every branch was explored.
    Exhausted,
    /// `max_solutions` solutions were found.
    SolutionLimit,
    /// The interrupt flag was raised.
    Interrupted,
}

/// Counters collected during one search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Number of column selections ("updates").
    pub updates: u64,
    pub solutions_found: u64,
    /// Deepest number of simultaneously chosen columns.
    pub max_depth: usize,
    pub elapsed: Duration,
    pub termination: Termination,
}

/// Solutions of one search, each a list of matrix row indices in the order chosen.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub solutions: Vec<Vec<usize>>,
    pub stats: SearchStatistics,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Header index of the owning column (the node itself for headers).
    column: usize,
    row: usize,
}

/// One level of the search: the column being branched on and the row node
/// currently selected from it (the header itself before the first row).
#[derive(Clone, Copy, Debug)]
struct Frame {
    column: usize,
    node: usize,
}

/// The dancing-links web for one constraint matrix.
///
/// Arena layout: headers at `0..columns` (so a header index is its column
/// index), the root sentinel at `columns`, data nodes after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DancingLinks {
    nodes: Vec<Node>,
    sizes: Vec<usize>,
    config: SolverConfig,
}

impl DancingLinks {
    /// Links up the nodes for `matrix`.
    ///
    /// Rows without any `true` cell are skipped; they can never be chosen.
    pub fn new(matrix: &ConstraintMatrix, config: SolverConfig) -> Self {
        let column_count = matrix.column_count();
        let root = column_count;
        let mut nodes = Vec::with_capacity(column_count + 1);

        for column in 0..column_count {
            nodes.push(Node {
                left: if column == 0 { root } else { column - 1 },
                // the last header's right neighbour is the root at `column_count`
                right: column + 1,
                up: column,
                down: column,
                column,
                row: NO_ROW,
            });
        }
        nodes.push(Node {
            left: column_count.saturating_sub(1),
            right: 0,
            up: root,
            down: root,
            column: root,
            row: NO_ROW,
        });

        let mut links = Self {
            nodes,
            sizes: vec![0; column_count],
            config,
        };
        for row in 0..matrix.row_count() {
            links.append_row(row, matrix.row_columns(row));
        }
        links
    }

    fn append_row(&mut self, row: usize, columns: impl Iterator<Item = usize>) {
        let mut first: Option<usize> = None;

        for column in columns {
            let index = self.nodes.len();
            let up = self.nodes[column].up;
            self.nodes.push(Node {
                left: index,
                right: index,
                up,
                down: column,
                column,
                row,
            });
            self.nodes[up].down = index;
            self.nodes[column].up = index;
            self.sizes[column] += 1;

            match first {
                None => first = Some(index),
                Some(first) => {
                    let last = self.nodes[first].left;
                    self.nodes[index].left = last;
                    self.nodes[index].right = first;
                    self.nodes[last].right = index;
                    self.nodes[first].left = index;
                }
            }
        }
    }

    #[inline]
    fn root(&self) -> usize {
        self.sizes.len()
    }

    /// Number of constraint columns, live or covered.
    pub fn column_count(&self) -> usize {
        self.sizes.len()
    }

    /// Number of rows currently linked into `column`.
    pub fn column_size(&self, column: usize) -> usize {
        self.sizes[column]
    }

    /// Live columns in header order.
    pub fn active_columns(&self) -> Vec<usize> {
        let root = self.root();
        let mut columns = Vec::new();
        let mut column = self.nodes[root].right;
        while column != root {
            columns.push(column);
            column = self.nodes[column].right;
        }
        columns
    }

    /// Removes `column` from the header list and every row meeting it from
    /// the other columns.
    ///
    /// Rows are visited top to bottom and each row's nodes left to right.
    pub fn cover(&mut self, column: usize) {
        let Node { left, right, .. } = self.nodes[column];
        self.nodes[right].left = left;
        self.nodes[left].right = right;

        let mut i = self.nodes[column].down;
        while i != column {
            let mut j = self.nodes[i].right;
            while j != i {
                let Node { up, down, .. } = self.nodes[j];
                self.nodes[down].up = up;
                self.nodes[up].down = down;
                self.sizes[self.nodes[j].column] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    /// Exact inverse of [`cover`](Self::cover).
    ///
    /// Rows are visited bottom to top and each row's nodes right to left, and
    /// the header is relinked last.
    pub fn uncover(&mut self, column: usize) {
        let mut i = self.nodes[column].up;
        while i != column {
            let mut j = self.nodes[i].left;
            while j != i {
                let Node { up, down, .. } = self.nodes[j];
                self.sizes[self.nodes[j].column] += 1;
                self.nodes[down].up = j;
                self.nodes[up].down = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let Node { left, right, .. } = self.nodes[column];
        self.nodes[right].left = column;
        self.nodes[left].right = column;
    }

    /// Covers the other columns of the row `node` belongs to, left to right.
    fn cover_row(&mut self, node: usize) {
        let mut j = self.nodes[node].right;
        while j != node {
            self.cover(self.nodes[j].column);
            j = self.nodes[j].right;
        }
    }

    /// Undoes [`cover_row`](Self::cover_row), right to left.
    fn uncover_row(&mut self, node: usize) {
        let mut j = self.nodes[node].left;
        while j != node {
            self.uncover(self.nodes[j].column);
            j = self.nodes[j].left;
        }
    }

    /// Picks the column to branch on. Requires at least one live column.
    fn choose_column(&self) -> usize {
        let root = self.root();
        let first = self.nodes[root].right;
        match self.config.selection {
            ColumnSelection::FirstAvailable => first,
            ColumnSelection::MinimumSize => {
                let mut best = first;
                let mut column = self.nodes[first].right;
                while column != root {
                    // strict comparison keeps the leftmost of equal sizes
                    if self.sizes[column] < self.sizes[best] {
                        best = column;
                    }
                    column = self.nodes[column].right;
                }
                best
            }
        }
    }

    /// Finds every solution (up to `max_solutions`).
    pub fn find_solutions(&mut self) -> SearchResult {
        self.search(None)
    }

    /// Like [`find_solutions`](Self::find_solutions), but gives up once `stop` is set.
    ///
    /// The flag is checked each time a column is about to be chosen. On
    /// interruption all pending uncovers are performed before returning, so
    /// the web is left exactly as it was built.
    pub fn find_solutions_until(&mut self, stop: &AtomicBool) -> SearchResult {
        self.search(Some(stop))
    }

    fn search(&mut self, stop: Option<&AtomicBool>) -> SearchResult {
        let start = Instant::now();
        let root = self.root();
        let max_solutions = self.config.max_solutions;

        let mut solutions: Vec<Vec<usize>> = Vec::new();
        let mut partial: Vec<usize> = Vec::new();
        let mut frames: Vec<Frame> = Vec::new();
        let mut updates = 0u64;
        let mut max_depth = 0usize;
        let mut termination = if max_solutions == Some(0) {
            Termination::SolutionLimit
        } else {
            Termination::Exhausted
        };

        'descend: while termination == Termination::Exhausted {
            if self.nodes[root].right == root {
                // every column is covered
                log::trace!("solution #{}: rows {:?}", solutions.len() + 1, partial);
                solutions.push(partial.clone());
                if max_solutions.is_some_and(|limit| solutions.len() >= limit) {
                    termination = Termination::SolutionLimit;
                }
            } else if stop.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                termination = Termination::Interrupted;
            } else {
                let column = self.choose_column();
                updates += 1;
                self.cover(column);
                frames.push(Frame {
                    column,
                    node: column,
                });
                max_depth = max_depth.max(frames.len());
            }

            // advance to the next untried row, backtracking through exhausted columns
            while let Some(frame) = frames.last_mut() {
                if frame.node != frame.column {
                    self.uncover_row(frame.node);
                    partial.pop();
                }

                let next = self.nodes[frame.node].down;
                if termination != Termination::Exhausted || next == frame.column {
                    self.uncover(frame.column);
                    frames.pop();
                    continue;
                }

                frame.node = next;
                partial.push(self.nodes[next].row);
                self.cover_row(next);
                continue 'descend;
            }

            break;
        }

        let stats = SearchStatistics {
            updates,
            solutions_found: solutions.len() as u64,
            max_depth,
            elapsed: start.elapsed(),
            termination,
        };
        log::info!(
            "search finished ({:?}): {} solutions, {} updates, {:.3?}",
            stats.termination,
            stats.solutions_found,
            stats.updates,
            stats.elapsed
        );

        SearchResult { solutions, stats }
    }
}

/// Builds the web for `matrix` and enumerates its solutions.
pub fn solve(matrix: &ConstraintMatrix, config: SolverConfig) -> SearchResult {
    DancingLinks::new(matrix, config).find_solutions()
}
