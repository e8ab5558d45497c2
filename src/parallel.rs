// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Thread pools for the two shapes of work.
//!
//! Per-pixel algorithms hand out whole image rows from a shared queue.
//! Rows are disjoint slices of the output, so workers write without
//! any further locking and the result does not depend on which worker
//! drew which row.
//!
//! The accumulating algorithm hands out numbered jobs instead.  Every
//! worker owns one region of a single allocation as its histogram, and
//! the regions are summed once every worker has joined.

use std::ops::Range;
use std::panic;
use std::sync::{Arc, Mutex, PoisonError};

use crossbeam::thread::ScopedJoinHandle;

use crate::coloring::Rgb;
use crate::planes::Pixel;
use crate::raster::{Image, CHANNELS};

type RowQueue<'a> = Arc<Mutex<std::iter::Enumerate<std::slice::ChunksMut<'a, u8>>>>;
type JobQueue = Arc<Mutex<Range<u64>>>;

/// Run `shade` over every pixel of `image` on `threads` workers,
/// painting the pixels it returns a color for and leaving the rest
/// untouched.
pub fn paint_rows<F>(image: &mut Image, threads: usize, shade: F)
where
    F: Fn(Pixel) -> Option<Rgb> + Sync,
{
    let shade = &shade;
    let result = crossbeam::scope(|spawner| {
        let rows: RowQueue = Arc::new(Mutex::new(image.rows_mut().enumerate()));
        for _ in 0..threads.max(1) {
            let rows = rows.clone();
            spawner.spawn(move |_| loop {
                let row = { rows.lock().unwrap_or_else(PoisonError::into_inner).next() };
                match row {
                    Some((y, row)) => {
                        for (x, rgb) in row.chunks_mut(CHANNELS).enumerate() {
                            if let Some(color) = shade(Pixel(x, y)) {
                                rgb.copy_from_slice(&color);
                            }
                        }
                    }
                    None => {
                        break;
                    }
                }
            });
        }
    });
    if let Err(failure) = result {
        panic::resume_unwind(failure);
    }
}

/// Run jobs `0..jobs` on `threads` workers.  Each worker gets a private
/// histogram of `cells` counters; `work` adds one job's visits to the
/// histogram it is handed and returns how many samples it counted.
///
/// Returns the summed histogram and the summed sample count.
pub fn accumulate<F>(cells: usize, threads: usize, jobs: u64, work: F) -> (Vec<u64>, u64)
where
    F: Fn(u64, &mut [u64]) -> u64 + Sync,
{
    let threads = workers(threads, jobs);
    let work = &work;
    let mut allocation = vec![0_u64; cells * threads];
    let result = crossbeam::scope(|spawner| {
        let queue: JobQueue = Arc::new(Mutex::new(0..jobs));
        let handles: Vec<ScopedJoinHandle<u64>> = allocation
            .chunks_mut(cells.max(1))
            .map(|region| {
                let queue = queue.clone();
                spawner.spawn(move |_| {
                    let mut counted = 0;
                    loop {
                        let job = {
                            queue
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .next()
                        };
                        match job {
                            Some(job) => counted += work(job, region),
                            None => {
                                break;
                            }
                        }
                    }
                    counted
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .sum::<u64>()
    });
    match result {
        Ok(counted) => (merge(&allocation, cells), counted),
        Err(failure) => panic::resume_unwind(failure),
    }
}

/// Never more workers than jobs, since an idle worker would still own a
/// full region of the allocation.
fn workers(threads: usize, jobs: u64) -> usize {
    let jobs = usize::try_from(jobs.max(1)).unwrap_or(usize::MAX);
    threads.max(1).min(jobs)
}

/// Given a collection of histograms in a contiguous block, sum them
/// into a single histogram.
fn merge(regions: &[u64], cells: usize) -> Vec<u64> {
    let mut total = vec![0_u64; cells];
    if cells == 0 {
        return total;
    }
    for region in regions.chunks(cells) {
        for (sum, count) in total.iter_mut().zip(region) {
            *sum += count;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paints_every_row_once() {
        for threads in 1..5 {
            let mut image = Image::new(7, 5);
            paint_rows(&mut image, threads, |Pixel(x, y)| Some([x as u8, y as u8, 1]));
            for y in 0..5 {
                for x in 0..7 {
                    assert_eq!(image.pixel(Pixel(x, y)), [x as u8, y as u8, 1]);
                }
            }
        }
    }

    #[test]
    fn unpainted_pixels_keep_the_background() {
        let mut image = Image::new(4, 4);
        paint_rows(&mut image, 3, |Pixel(x, y)| if x == y { Some([9, 9, 9]) } else { None });
        assert_eq!(image.pixel(Pixel(2, 2)), [9, 9, 9]);
        assert_eq!(image.pixel(Pixel(1, 2)), [0, 0, 0]);
    }

    #[test]
    fn histograms_are_summed() {
        // Job n visits cell n % 4 exactly n times.
        let work = |job: u64, histogram: &mut [u64]| {
            histogram[(job % 4) as usize] += job;
            1
        };
        let (reference, jobs) = accumulate(4, 1, 20, work);
        assert_eq!(jobs, 20);
        assert_eq!(reference.iter().sum::<u64>(), (0..20).sum::<u64>());
        for threads in 2..6 {
            assert_eq!(accumulate(4, threads, 20, work), (reference.clone(), 20));
        }
    }

    #[test]
    fn no_jobs_leaves_an_empty_histogram() {
        let (histogram, counted) = accumulate(3, 4, 0, |_, _| 1);
        assert_eq!(histogram, vec![0, 0, 0]);
        assert_eq!(counted, 0);
    }

    #[test]
    fn few_jobs_spawn_few_workers() {
        assert_eq!(workers(64, 0), 1);
        assert_eq!(workers(64, 3), 3);
        assert_eq!(workers(4, 1_000), 4);
        assert_eq!(workers(0, 10), 1);

        let seen = Mutex::new(std::collections::HashSet::new());
        let (histogram, counted) = accumulate(2, 32, 2, |job, region| {
            seen.lock().unwrap().insert(region.as_ptr() as usize);
            region[job as usize] += 1;
            1
        });
        assert_eq!(histogram, vec![1, 1]);
        assert_eq!(counted, 2);
        assert!(seen.lock().unwrap().len() <= 2);
    }

    #[test]
    #[should_panic]
    fn worker_panics_reach_the_caller() {
        accumulate(1, 2, 4, |job, _| if job == 3 { panic!("boom") } else { 0 });
    }

    #[test]
    fn merge_adds_regions_cellwise() {
        assert_eq!(merge(&[1, 2, 3, 10, 20, 30], 3), vec![11, 22, 33]);
    }
}
