use crate::error::{FoundryError, FoundryResult};

use rayon::prelude::*;
use std::ops::Add;

/// Arrays at least this long are summed on the rayon pool.
const PARALLEL_THRESHOLD: usize = 1 << 14;

/// Scalar addition.
pub fn add<T: Add<Output = T>>(a: T, b: T) -> T {
    a + b
}

/// Element-wise sum of two equally sized slices.
pub fn add_arrays<T>(a: &[T], b: &[T]) -> FoundryResult<Vec<T>>
where
    T: Copy + Add<Output = T> + Send + Sync,
{
    check_len(a.len(), b.len())?;
    if a.len() >= PARALLEL_THRESHOLD {
        Ok(a.par_iter().zip(b.par_iter()).map(|(&x, &y)| x + y).collect())
    } else {
        Ok(a.iter().zip(b).map(|(&x, &y)| x + y).collect())
    }
}

/// Element-wise sum written into `out`. All three slices must have the same length.
pub fn add_arrays_into<T>(a: &[T], b: &[T], out: &mut [T]) -> FoundryResult<()>
where
    T: Copy + Add<Output = T> + Send + Sync,
{
    check_len(a.len(), b.len())?;
    check_len(a.len(), out.len())?;
    if a.len() >= PARALLEL_THRESHOLD {
        out.par_iter_mut()
            .zip(a.par_iter().zip(b.par_iter()))
            .for_each(|(o, (&x, &y))| *o = x + y);
    } else {
        for (o, (&x, &y)) in out.iter_mut().zip(a.iter().zip(b)) {
            *o = x + y;
        }
    }
    Ok(())
}

fn check_len(left: usize, right: usize) -> FoundryResult<()> {
    if left != right {
        return Err(FoundryError::LengthMismatch { left, right });
    }
    Ok(())
}
