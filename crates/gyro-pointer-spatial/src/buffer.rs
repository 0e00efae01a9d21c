//! Latency compensation buffer
//!
//! Keeps the last few orientation samples and estimates the reading at a target
//! time by interpolating between the two newest ones, extrapolating slightly past
//! the newest sample to hide network delay.

use crate::orientation::wrap_degrees;
use crate::{clamp, OrientationSample};
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 3;

/// Maximum interpolation factor; 1.5 allows extrapolating half an interval ahead
const MAX_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
struct BufferedSample {
    sample: OrientationSample,
    timestamp: f64,
}

/// Fixed-capacity FIFO of timestamped samples
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    capacity: usize,
    samples: VecDeque<BufferedSample>,
}

impl SampleBuffer {
    /// Create a buffer holding at most `capacity` samples (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push a sample received at `timestamp` (ms), evicting the oldest when full
    pub fn add(&mut self, sample: OrientationSample, timestamp: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(BufferedSample { sample, timestamp });
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<OrientationSample> {
        self.samples.back().map(|b| b.sample)
    }

    /// Estimate the sample at `target_time` (ms), or at the current wall-clock time
    /// when `None`.
    ///
    /// With one sample it is returned unchanged. With two or more, the two newest
    /// are blended with a factor clamped to `[0, 1.5]`. Yaw follows the shorter
    /// arc around the circle; pitch and roll blend linearly. The result carries
    /// `target_time` as its timestamp.
    pub fn interpolated(&self, target_time: Option<f64>) -> Option<OrientationSample> {
        let n = self.samples.len();
        match n {
            0 => None,
            1 => self.latest(),
            _ => {
                let older = self.samples[n - 2];
                let newer = self.samples[n - 1];
                let (t1, t2) = (older.timestamp, newer.timestamp);

                if t2 == t1 {
                    return Some(newer.sample);
                }

                let target_time = target_time.unwrap_or_else(now_millis);
                let factor = clamp((target_time - t1) / (t2 - t1), 0.0, MAX_FACTOR);

                let (s1, s2) = (older.sample, newer.sample);
                Some(OrientationSample {
                    yaw: lerp_yaw(s1.yaw, s2.yaw, factor),
                    pitch: lerp(s1.pitch, s2.pitch, factor),
                    roll: lerp(s1.roll, s2.roll, factor),
                    timestamp: Some(target_time),
                })
            }
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn size(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_yaw(mut v1: f64, mut v2: f64, t: f64) -> f64 {
    if (v2 - v1).abs() > 180.0 {
        if v1 < v2 {
            v1 += 360.0;
        } else {
            v2 += 360.0;
        }
    }
    wrap_degrees(lerp(v1, v2, t))
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(yaw: f64, pitch: f64, roll: f64) -> OrientationSample {
        OrientationSample::new(yaw, pitch, roll)
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = SampleBuffer::default();
        assert!(buffer.latest().is_none());
        assert!(buffer.interpolated(Some(1000.0)).is_none());
        assert_eq!(buffer.size(), 0);
    }

    #[test]
    fn test_add_and_latest() {
        let mut buffer = SampleBuffer::new(3);
        buffer.add(sample(180.0, 0.0, 0.0), 1000.0);
        assert_eq!(buffer.latest(), Some(sample(180.0, 0.0, 0.0)));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut buffer = SampleBuffer::new(3);
        for i in 0..5 {
            buffer.add(sample(i as f64, 0.0, 0.0), 1000.0 + i as f64);
        }
        assert_eq!(buffer.size(), 3);
        assert_eq!(buffer.latest().map(|s| s.yaw), Some(4.0));
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut buffer = SampleBuffer::new(0);
        buffer.add(sample(1.0, 0.0, 0.0), 1.0);
        buffer.add(sample(2.0, 0.0, 0.0), 2.0);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.size(), 1);
    }

    #[test]
    fn test_single_sample_returned_unchanged() {
        let mut buffer = SampleBuffer::new(3);
        let s = sample(12.0, 3.0, -4.0).with_timestamp(5.0);
        buffer.add(s, 1000.0);
        assert_eq!(buffer.interpolated(Some(99_999.0)), Some(s));
    }

    #[test]
    fn test_midpoint_interpolation() {
        let mut buffer = SampleBuffer::new(3);
        buffer.add(sample(0.0, 0.0, 0.0), 1000.0);
        buffer.add(sample(100.0, 50.0, 10.0), 2000.0);

        let result = buffer.interpolated(Some(1500.0)).unwrap();
        assert!((result.yaw - 50.0).abs() < 1e-9);
        assert!((result.pitch - 25.0).abs() < 1e-9);
        assert!((result.roll - 5.0).abs() < 1e-9);
        assert_eq!(result.timestamp, Some(1500.0));
    }

    #[test]
    fn test_uses_two_newest_samples() {
        let mut buffer = SampleBuffer::new(3);
        buffer.add(sample(300.0, -40.0, 0.0), 0.0);
        buffer.add(sample(0.0, 0.0, 0.0), 1000.0);
        buffer.add(sample(100.0, 50.0, 10.0), 2000.0);

        let result = buffer.interpolated(Some(1500.0)).unwrap();
        assert!((result.yaw - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_yaw_wraparound_takes_short_arc() {
        let mut buffer = SampleBuffer::new(3);
        buffer.add(sample(350.0, 0.0, 0.0), 1000.0);
        buffer.add(sample(10.0, 0.0, 0.0), 2000.0);

        let yaw = buffer.interpolated(Some(1500.0)).unwrap().yaw;
        assert!(yaw < 30.0 || yaw >= 330.0, "yaw went the long way: {yaw}");
        assert!((0.0..360.0).contains(&yaw));
    }

    #[test]
    fn test_yaw_wraparound_other_direction() {
        let mut buffer = SampleBuffer::new(3);
        buffer.add(sample(10.0, 0.0, 0.0), 1000.0);
        buffer.add(sample(350.0, 0.0, 0.0), 2000.0);

        let yaw = buffer.interpolated(Some(1750.0)).unwrap().yaw;
        assert!((yaw - 355.0).abs() < 1e-9, "got {yaw}");
    }

    #[test]
    fn test_extrapolation_is_capped() {
        let mut buffer = SampleBuffer::new(3);
        buffer.add(sample(0.0, 0.0, 0.0), 1000.0);
        buffer.add(sample(100.0, 10.0, 0.0), 2000.0);

        let result = buffer.interpolated(Some(10_000.0)).unwrap();
        assert!((result.yaw - 150.0).abs() < 1e-9);
        assert!((result.pitch - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_before_older_sample_clamps_to_zero() {
        let mut buffer = SampleBuffer::new(3);
        buffer.add(sample(20.0, 5.0, 0.0), 1000.0);
        buffer.add(sample(100.0, 10.0, 0.0), 2000.0);

        let result = buffer.interpolated(Some(0.0)).unwrap();
        assert!((result.yaw - 20.0).abs() < 1e-9);
        assert!((result.pitch - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_timestamps_return_newest() {
        let mut buffer = SampleBuffer::new(3);
        buffer.add(sample(20.0, 5.0, 0.0), 1000.0);
        buffer.add(sample(100.0, 10.0, 0.0), 1000.0);
        assert_eq!(buffer.interpolated(Some(1500.0)), Some(sample(100.0, 10.0, 0.0)));
    }

    #[test]
    fn test_clear() {
        let mut buffer = SampleBuffer::new(3);
        buffer.add(sample(180.0, 0.0, 0.0), 1000.0);
        buffer.add(sample(190.0, 0.0, 0.0), 2000.0);
        assert_eq!(buffer.size(), 2);

        buffer.clear();
        assert_eq!(buffer.size(), 0);
        assert!(buffer.latest().is_none());
    }
}
