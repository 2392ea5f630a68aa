use std::any::Any;
use std::fmt::Debug;
use std::ops::Range;

use crate::SimulationError;

pub trait Scalar: Copy + PartialEq + Debug + Any + Send + Sync {}
impl<T: Copy + PartialEq + Debug + Any + Send + Sync> Scalar for T {}

/// Contiguous row-major 2D buffer. Rows run south to north (`j`), columns
/// west to east (`i`).
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D<T: Scalar> {
    values: Vec<T>,

    num_rows: usize,
    num_columns: usize,
}

impl<T: Scalar> Field2D<T>
where
    T: Default,
{
    pub fn zeros(num_rows: usize, num_columns: usize) -> Self {
        Field2D {
            num_rows,
            num_columns,
            values: vec![T::default(); num_rows * num_columns],
        }
    }

    pub fn from_vec(
        num_rows: usize,
        num_columns: usize,
        values: Vec<T>,
    ) -> Result<Self, SimulationError> {
        if values.len() != num_rows * num_columns {
            return Err(SimulationError::shape_mismatch(
                "field data",
                (num_rows, num_columns),
                (values.len(), 1),
            ));
        }

        Ok(Field2D {
            values,
            num_rows,
            num_columns,
        })
    }

    pub fn rows(&self) -> usize {
        self.num_rows
    }

    pub fn cols(&self) -> usize {
        self.num_columns
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows, self.num_columns)
    }

    #[inline(always)]
    pub fn get(&self, row_idx: usize, column_idx: usize) -> T {
        let idx = self.index_from_row_and_column(row_idx, column_idx);
        self.values[idx]
    }

    #[inline(always)]
    pub fn set(&mut self, row_idx: usize, column_idx: usize, value: T) {
        let idx = self.index_from_row_and_column(row_idx, column_idx);
        self.values[idx] = value
    }

    pub fn set_all(&mut self, value: T) {
        self.values.iter_mut().for_each(|x| *x = value);
    }

    pub fn row(&self, row_idx: usize) -> &[T] {
        let start = row_idx * self.num_columns;
        &self.values[start..start + self.num_columns]
    }

    pub fn row_mut(&mut self, row_idx: usize) -> &mut [T] {
        let start = row_idx * self.num_columns;
        &mut self.values[start..start + self.num_columns]
    }

    /// Overwrites row `dst_row` with the contents of row `src_row`.
    pub fn copy_row(&mut self, src_row: usize, dst_row: usize) {
        let src_start = src_row * self.num_columns;
        self.values.copy_within(
            src_start..src_start + self.num_columns,
            dst_row * self.num_columns,
        );
    }

    /// Overwrites column `dst_column` with the contents of column `src_column`.
    pub fn copy_column(&mut self, src_column: usize, dst_column: usize) {
        for row in self.values.chunks_mut(self.num_columns) {
            row[dst_column] = row[src_column];
        }
    }

    /// Copies out the sub-block covering `rows` x `columns`.
    pub fn extract(&self, rows: Range<usize>, columns: Range<usize>) -> Self {
        let num_columns = columns.len();
        let mut values = Vec::with_capacity(rows.len() * num_columns);
        for row_idx in rows.clone() {
            values.extend_from_slice(&self.row(row_idx)[columns.clone()]);
        }

        Field2D {
            values,
            num_rows: rows.len(),
            num_columns,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.values.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    #[inline(always)]
    fn index_from_row_and_column(&self, row_idx: usize, column_idx: usize) -> usize {
        row_idx * self.num_columns + column_idx
    }
}
