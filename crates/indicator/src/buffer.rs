/// # Summary
/// 固定容量的滚动环形缓冲区，RSI 的尾随窗口均值由它承载。
///
/// # Invariants
/// - 存储随写入增长，最多到 `capacity`，容量本身不触发预分配。
/// - 始终保持最近 N 个元素。
#[derive(Debug, Clone)]
pub struct RollingBuffer<T> {
    // 内部存储容器
    data: Vec<T>,
    // 最大容量
    capacity: usize,
    // 已满后下一次覆盖的位置
    cursor: usize,
    // 当前元素个数的浮点计数，用作均值分母
    count: f64,
}

impl<T> RollingBuffer<T> {
    /// # Summary
    /// 创建一个新的滚动缓冲区。
    ///
    /// # Arguments
    /// * `capacity`: 固定容量上限。
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            capacity,
            cursor: 0,
            count: 0.0,
        }
    }

    /// 写入新元素，已满时覆盖最旧的一个。
    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.data.len() < self.capacity {
            self.data.push(item);
            self.count += 1.0;
        } else {
            self.data[self.cursor] = item;
            self.cursor = (self.cursor + 1) % self.capacity;
        }
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.data.len() == self.capacity
    }
}

impl RollingBuffer<f64> {
    /// 窗口均值，未填满时为 None。每次重新求和。
    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        Some(self.data.iter().sum::<f64>() / self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_requires_full_window() {
        let mut buffer = RollingBuffer::new(2);
        buffer.push(1.0);
        assert_eq!(buffer.mean(), None);
        buffer.push(3.0);
        assert_eq!(buffer.mean(), Some(2.0));
        buffer.push(5.0);
        assert_eq!(buffer.mean(), Some(4.0));
        buffer.push(7.0);
        assert_eq!(buffer.mean(), Some(6.0));
    }

    #[test]
    fn test_mean_returns_exact_zero_after_values_leave() {
        let mut buffer = RollingBuffer::new(2);
        for value in [0.1, 0.7, 0.0, 0.0] {
            buffer.push(value);
        }
        assert_eq!(buffer.mean(), Some(0.0));
    }

    #[test]
    fn test_zero_capacity_never_fills() {
        let mut buffer: RollingBuffer<f64> = RollingBuffer::new(0);
        buffer.push(1.0);
        assert!(!buffer.is_full());
        assert_eq!(buffer.mean(), None);
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut buffer = RollingBuffer::new(usize::MAX);
        buffer.push(1.0);
        buffer.push(2.0);
        assert!(!buffer.is_full());
        assert_eq!(buffer.mean(), None);
    }
}
