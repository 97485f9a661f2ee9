use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskingPattern);
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (((r + c) & 1) as i32 + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

#[cfg(test)]
mod mask_pattern_tests {
    use test_case::test_case;

    use super::MaskPattern;
    use crate::common::error::QRError;

    #[test]
    fn test_new() {
        assert!(MaskPattern::new(7).is_ok());
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
        assert_eq!(MaskPattern::all().count(), 8);
    }

    // Expected first row and first column of each mask on a 6x6 patch
    #[test_case(0, "101010", "101010")]
    #[test_case(1, "111111", "101010")]
    #[test_case(2, "100100", "111111")]
    #[test_case(3, "100100", "100100")]
    #[test_case(4, "111000", "110011")]
    #[test_case(5, "111111", "111111")]
    #[test_case(6, "111111", "111111")]
    #[test_case(7, "101010", "101010")]
    fn test_mask_edges(pattern: u8, row: &str, col: &str) {
        let f = MaskPattern::new(pattern).unwrap().mask_functions();
        let to_str = |bits: Vec<bool>| bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
        let act_row: String = to_str((0..6).map(|c| f(0, c)).collect());
        let act_col: String = to_str((0..6).map(|r| f(r, 0)).collect());
        assert_eq!(act_row, row);
        assert_eq!(act_col, col);
    }

    #[test]
    fn test_mask_interior() {
        let fields = MaskPattern::new(5).unwrap().mask_functions();
        assert!(fields(2, 3));
        assert!(!fields(1, 1));
        let diamonds = MaskPattern::new(6).unwrap().mask_functions();
        assert!(diamonds(1, 1));
        assert!(!diamonds(1, 3));
        let meadow = MaskPattern::new(7).unwrap().mask_functions();
        assert!(meadow(1, 3));
        assert!(!meadow(1, 2));
    }
}

// Mask selection
//------------------------------------------------------------------------------

// Scores every pattern on a copy of the symbol and keeps the lowest penalty.
// Ties resolve to the lowest pattern id.
pub fn apply_best_mask(qr: &mut QR) -> (MaskPattern, u32) {
    let scores = MaskPattern::all()
        .map(|m| {
            let mut qr = qr.clone();
            qr.apply_mask(m);
            let score = compute_total_penalty(&qr);
            trace!(mask = *m, score, "Scored mask pattern");
            (m, score)
        })
        .collect::<Vec<_>>();

    let (best_mask, best_score) = scores
        .iter()
        .copied()
        .min_by_key(|&(_, score)| score)
        .unwrap_or((MaskPattern(0), 0));
    qr.apply_mask(best_mask);
    (best_mask, best_score)
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

fn line(qr: &QR, i: i16, is_hor: bool) -> Vec<Color> {
    let w = qr.width() as i16;
    (0..w).map(|j| if is_hor { *qr.get(i, j) } else { *qr.get(j, i) }).collect()
}

// 3 points for a run of 5 same colored modules, plus 1 for each extra module
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let mut pen = 0;
    for is_hor in [true, false] {
        for i in 0..w {
            let mut last = None;
            let mut run = 0;
            for clr in line(qr, i, is_hor) {
                if last == Some(clr) {
                    run += 1;
                } else {
                    last = Some(clr);
                    run = 1;
                }
                match run {
                    5 => pen += 3,
                    6.. => pen += 1,
                    _ => {}
                }
            }
        }
    }
    pen
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Finder like 1:1:3:1:1 run followed or preceded by 4 light modules
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 11] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Light,
        Color::Light,
        Color::Light,
        Color::Light,
    ];

    let w = qr.width() as i16;
    let mut pen = 0;
    for i in 0..w {
        let line = line(qr, i, is_hor);
        for win in line.windows(PATTERN.len()) {
            if win == PATTERN || win.iter().eq(PATTERN.iter().rev()) {
                pen += 40;
            }
        }
    }
    pen
}

// 10 points for every full 5% step the dark ratio strays from 50%
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let tot = w * w;
    let lo = dark_cnt * 20 / tot;
    let hi = (dark_cnt * 20).div_ceil(tot);
    (lo.abs_diff(10).min(hi.abs_diff(10)) * 10) as u32
}
