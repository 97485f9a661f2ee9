use super::metadata::Version;

// Zigzag walk over the symbol used for payload placement
//------------------------------------------------------------------------------
// Column pairs are visited right to left, starting at the bottom right corner
// and alternating upward and downward sweeps. The vertical timing column is
// skipped entirely. Every other module is yielded exactly once, function
// modules included, so the caller decides which ones to fill.

static VERT_TIMING_COL: i16 = 6;

pub struct EncRegionIter {
    r: i16,
    // Right column of the current pair
    c: i16,
    w: i16,
    is_left: bool,
    is_upward: bool,
}

impl EncRegionIter {
    pub const fn new(ver: Version) -> Self {
        let w = ver.width() as i16;
        Self { r: w - 1, c: w - 1, w, is_left: false, is_upward: true }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 1 {
            return None;
        }

        let res = (self.r, self.c - self.is_left as i16);
        if !self.is_left {
            self.is_left = true;
            return Some(res);
        }

        self.is_left = false;
        let end = if self.is_upward { 0 } else { self.w - 1 };
        if self.r == end {
            self.is_upward = !self.is_upward;
            self.c -= 2;
            if self.c == VERT_TIMING_COL {
                self.c -= 1;
            }
        } else if self.is_upward {
            self.r -= 1;
        } else {
            self.r += 1;
        }
        Some(res)
    }
}
