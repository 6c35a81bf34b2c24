//! Dense in-memory cube.

use pricer_core::types::Date;

use super::NpvCube;
use crate::error::ExposureError;

/// Dense cube laid out `[id][date][sample][depth]`.
///
/// Each id owns a contiguous block, so the cube can be split into disjoint
/// per-id slots for parallel writers.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_xva::cube::{InMemoryCube, NpvCube};
///
/// let dates = vec![Date::from_ymd(2025, 1, 1).unwrap()];
/// let mut cube = InMemoryCube::new(Date::from_ymd(2024, 1, 1).unwrap(), 2, dates, 3, 1);
/// cube.set(4.0, 1, 0, 2, 0);
/// cube.set_t0(1.5, 0, 0);
/// assert_eq!(cube.get(1, 0, 2), 4.0);
/// assert_eq!(cube.get_t0(0), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryCube {
    as_of: Date,
    num_ids: usize,
    dates: Vec<Date>,
    samples: usize,
    depth: usize,
    t0: Vec<f64>,
    data: Vec<f64>,
}

impl InMemoryCube {
    /// Zero-initialised cube. A depth of zero is treated as one.
    pub fn new(as_of: Date, num_ids: usize, dates: Vec<Date>, samples: usize, depth: usize) -> Self {
        let depth = depth.max(1);
        let len = num_ids * dates.len() * samples * depth;
        Self {
            as_of,
            num_ids,
            samples,
            depth,
            t0: vec![0.0; num_ids * depth],
            data: vec![0.0; len],
            dates,
        }
    }

    /// Depth-one cube from t0 values and a `[id][date][sample]` array.
    pub fn from_values(
        as_of: Date,
        dates: Vec<Date>,
        t0: Vec<f64>,
        values: &[Vec<Vec<f64>>],
    ) -> Result<Self, ExposureError> {
        if values.len() != t0.len() {
            return Err(ExposureError::dimension("cube ids", t0.len(), values.len()));
        }
        let samples = values
            .first()
            .and_then(|by_date| by_date.first())
            .map_or(0, Vec::len);
        let mut cube = Self::new(as_of, t0.len(), dates, samples, 1);
        for (i, by_date) in values.iter().enumerate() {
            if by_date.len() != cube.dates.len() {
                return Err(ExposureError::dimension(
                    format!("cube dates of id {}", i),
                    cube.dates.len(),
                    by_date.len(),
                ));
            }
            for (j, by_sample) in by_date.iter().enumerate() {
                if by_sample.len() != samples {
                    return Err(ExposureError::dimension(
                        format!("cube samples of id {}, date {}", i, j),
                        samples,
                        by_sample.len(),
                    ));
                }
                for (k, &v) in by_sample.iter().enumerate() {
                    cube.set(v, i, j, k, 0);
                }
            }
        }
        cube.t0 = t0;
        Ok(cube)
    }

    /// As-of date of the run that produced the cube.
    #[inline]
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Number of depth slots.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    fn index(&self, id: usize, date: usize, sample: usize, depth: usize) -> usize {
        ((id * self.dates.len() + date) * self.samples + sample) * self.depth + depth
    }

    /// t0 value at a depth slot.
    #[inline]
    pub fn get_t0_depth(&self, id: usize, depth: usize) -> f64 {
        self.t0[id * self.depth + depth]
    }

    /// Value at a depth slot.
    #[inline]
    pub fn get_depth(&self, id: usize, date: usize, sample: usize, depth: usize) -> f64 {
        self.data[self.index(id, date, sample, depth)]
    }

    /// Sets a t0 value.
    #[inline]
    pub fn set_t0(&mut self, value: f64, id: usize, depth: usize) {
        self.t0[id * self.depth + depth] = value;
    }

    /// Sets a value.
    #[inline]
    pub fn set(&mut self, value: f64, id: usize, date: usize, sample: usize, depth: usize) {
        let idx = self.index(id, date, sample, depth);
        self.data[idx] = value;
    }

    /// Splits the cube into one mutable slot per id.
    pub fn slots_mut(&mut self) -> Vec<CubeSlotMut<'_>> {
        let (samples, depth) = (self.samples, self.depth);
        let block = self.dates.len() * samples * depth;
        let t0_chunks = self.t0.chunks_mut(depth);
        if block == 0 {
            t0_chunks
                .map(|t0| CubeSlotMut {
                    t0,
                    data: Default::default(),
                    samples,
                    depth,
                })
                .collect()
        } else {
            t0_chunks
                .zip(self.data.chunks_mut(block))
                .map(|(t0, data)| CubeSlotMut {
                    t0,
                    data,
                    samples,
                    depth,
                })
                .collect()
        }
    }
}

impl NpvCube for InMemoryCube {
    fn num_ids(&self) -> usize {
        self.num_ids
    }

    fn dates(&self) -> &[Date] {
        &self.dates
    }

    fn samples(&self) -> usize {
        self.samples
    }

    fn get_t0(&self, id: usize) -> f64 {
        self.get_t0_depth(id, 0)
    }

    fn get(&self, id: usize, date: usize, sample: usize) -> f64 {
        self.get_depth(id, date, sample, 0)
    }
}

/// Exclusive view of one id's block of an [`InMemoryCube`].
#[derive(Debug)]
pub struct CubeSlotMut<'a> {
    t0: &'a mut [f64],
    data: &'a mut [f64],
    samples: usize,
    depth: usize,
}

impl CubeSlotMut<'_> {
    /// Number of samples per date in this slot.
    #[inline]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Sets the t0 value.
    #[inline]
    pub fn set_t0(&mut self, value: f64, depth: usize) {
        self.t0[depth] = value;
    }

    /// Sets a value.
    #[inline]
    pub fn set(&mut self, value: f64, date: usize, sample: usize, depth: usize) {
        self.data[(date * self.samples + sample) * self.depth + depth] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<Date> {
        let start = Date::from_ymd(2024, 1, 31).unwrap();
        (1..=n).map(|m| start.add_months(m as u32)).collect()
    }

    fn today() -> Date {
        Date::from_ymd(2024, 1, 31).unwrap()
    }

    #[test]
    fn test_depth_layout() {
        let mut cube = InMemoryCube::new(today(), 2, dates(3), 4, 2);
        cube.set(1.0, 1, 2, 3, 1);
        cube.set(2.0, 1, 2, 3, 0);
        assert_eq!(cube.get_depth(1, 2, 3, 1), 1.0);
        assert_eq!(cube.get_depth(1, 2, 3, 0), 2.0);
        assert_eq!(cube.get_depth(0, 2, 3, 1), 0.0);
    }

    #[test]
    fn test_slots_write_own_block() {
        let mut cube = InMemoryCube::new(today(), 3, dates(2), 2, 2);
        for (id, mut slot) in cube.slots_mut().into_iter().enumerate() {
            slot.set_t0(id as f64, 1);
            slot.set(10.0 + id as f64, 1, 1, 0);
        }
        for id in 0..3 {
            assert_eq!(cube.get_t0_depth(id, 1), id as f64);
            assert_eq!(cube.get_depth(id, 1, 1, 0), 10.0 + id as f64);
        }
    }

    #[test]
    fn test_slots_with_empty_grid() {
        let mut cube = InMemoryCube::new(today(), 2, Vec::new(), 5, 1);
        let slots = cube.slots_mut();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_from_values_checks_shape() {
        let ok = InMemoryCube::from_values(
            today(),
            dates(1),
            vec![1.0, 2.0],
            &[vec![vec![1.0, 2.0]], vec![vec![3.0, 4.0]]],
        )
        .unwrap();
        assert_eq!(ok.samples(), 2);
        assert_eq!(ok.get(1, 0, 1), 4.0);
        assert_eq!(ok.get_t0(1), 2.0);

        let err = InMemoryCube::from_values(
            today(),
            dates(1),
            vec![1.0, 2.0],
            &[vec![vec![1.0, 2.0]], vec![vec![3.0]]],
        );
        assert!(matches!(err, Err(ExposureError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_mean_exposure() {
        let mut cube = InMemoryCube::new(today(), 1, dates(1), 4, 2);
        cube.set_t0(7.0, 0, 1);
        for k in 0..4 {
            cube.set(k as f64, 0, 0, k, 1);
        }
        assert_eq!(crate::cube::mean_exposure(&cube, 0, 1), vec![7.0, 1.5]);
    }
}
