pub const CPU_RANGE_SIZE: usize = 600;

/// Fixed-size sample buffer that clears itself when the write head wraps.
///
/// Unlike a sliding ring, nothing from before the wrap survives: the slot
/// after `capacity - 1` is index 0 of a freshly zeroed buffer.
#[derive(Clone, Debug)]
pub struct History {
    data: Vec<f64>,
    head: usize,
    recorded: bool,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(CPU_RANGE_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity.max(1)],
            head: 0,
            recorded: false,
        }
    }

    pub fn push(&mut self, value: f64) {
        if !self.recorded {
            // first sample takes slot 0 without advancing
            self.recorded = true;
        } else if self.head < self.data.len() - 1 {
            self.head += 1;
        } else {
            self.head = 0;
            self.data.fill(0.0);
        }
        self.data[self.head] = value;
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The `num_points` slots a chart of that resolution should plot.
    ///
    /// While the head is still inside the first `num_points` slots the prefix
    /// is returned, zero-filled where nothing was written yet. After that the
    /// window trails the head, stopping just short of it, so slot `i` of the
    /// window is the slot named by `labels(num_points)[i]`.
    pub fn window(&self, num_points: usize) -> &[f64] {
        let points = num_points.min(self.data.len());
        if points == 0 {
            return &[];
        }
        if self.head < points {
            &self.data[..points]
        } else {
            &self.data[self.head - points..self.head]
        }
    }

    /// Axis labels for a window of `num_points` ending at `head`.
    pub fn labels(&self, num_points: usize) -> Vec<String> {
        compute_labels(self.head, num_points.min(self.data.len()))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

pub fn compute_labels(head: usize, num_points: usize) -> Vec<String> {
    let offset = if head > num_points {
        head - num_points
    } else {
        0
    };
    (offset..offset + num_points).map(|i| i.to_string()).collect()
}
