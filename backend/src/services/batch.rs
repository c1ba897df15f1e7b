//! Partitioning of a bulk insert into bounded batches

/// One slice of a bulk insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// 0-based position of the batch in the run
    pub index: u64,
    /// Rows already covered by earlier batches
    pub offset: u64,
    pub size: u64,
}

/// Splits `total` rows into batches of at most `batch_size`
#[derive(Debug, Clone)]
pub struct BatchPlan {
    total: u64,
    batch_size: u64,
    next_offset: u64,
    next_index: u64,
}

impl BatchPlan {
    /// `batch_size` of zero is treated as one row per batch
    pub fn new(total: u64, batch_size: u64) -> Self {
        Self {
            total,
            batch_size: batch_size.max(1),
            next_offset: 0,
            next_index: 0,
        }
    }

    /// Number of batches, i.e. commits, the run will perform
    pub fn batch_count(&self) -> u64 {
        self.total.div_ceil(self.batch_size)
    }
}

impl Iterator for BatchPlan {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.next_offset >= self.total {
            return None;
        }
        let size = self.batch_size.min(self.total - self.next_offset);
        let batch = Batch {
            index: self.next_index,
            offset: self.next_offset,
            size,
        };
        self.next_offset += size;
        self.next_index += 1;
        Some(batch)
    }
}
