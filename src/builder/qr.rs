use image::{GrayImage, Luma};
use std::ops::Deref;

use crate::common::{
    bitstream::BitStream,
    error::{QRError, QRResult},
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::*,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

impl Module {
    // Anything other than payload, reserved areas included
    pub fn is_functional(&self) -> bool {
        !matches!(self, Module::Empty | Module::Data(_))
    }
}

#[derive(Debug, Clone)]
pub struct QR {
    grid: Box<[Module]>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w].into_boxed_slice(), w, ver, ecl, mask: None }
    }

    // Row major
    pub fn modules(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn metadata(&self) -> String {
        match self.mask {
            Some(m) => {
                format!("{{ Version: {}, Ec level: {:?}, Mask: {} }}", *self.ver, self.ecl, *m)
            }
            None => format!("{{ Version: {}, Ec level: {:?}, Mask: None }}", *self.ver, self.ecl),
        }
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1) + 1) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub(crate) fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub(crate) fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }

    // Writes only into empty modules, so function patterns are never overwritten
    fn set_if_empty(&mut self, r: i16, c: i16, module: Module) {
        let m = self.get_mut(r, c);
        if matches!(m, Module::Empty) {
            *m = module;
        }
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // 9x9 footprint around the center, clipped at the symbol edge. Rings at
    // distance 2 and 4 are light, which makes the outer ring the separator.
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    // Skipped wherever the 5x5 footprint touches an existing function module
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let overlaps =
            (-2..=2).any(|i| (-2..=2).any(|j| self.get(r + i, c + j).is_functional()));
        if overlaps {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_patterns(&mut self) {
        let w = self.w as i16;
        for i in 0..w {
            let m = Module::Func(Color::from(i & 1 == 0));
            self.set_if_empty(6, i, m);
            self.set_if_empty(i, 6, m);
        }
    }

    fn draw_dark_module(&mut self) {
        self.set(-8, 8, Module::Func(Color::Dark));
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        let coords = FORMAT_INFO_COORDS_QR_MAIN.iter().chain(FORMAT_INFO_COORDS_QR_SIDE.iter());
        for &(r, c) in coords {
            self.set_if_empty(r, c, Module::Format(Color::Light));
        }
    }

    fn reserve_version_area(&mut self) {
        if self.ver.info().is_none() {
            return;
        }
        let coords = VERSION_INFO_COORDS_BL.iter().chain(VERSION_INFO_COORDS_TR.iter());
        for &(r, c) in coords {
            self.set(r, c, Module::Version(Color::Light));
        }
    }

    pub(crate) fn draw_format_info(&mut self, format_info: u32) {
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_QR_MAIN,
        );
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_QR_SIDE,
        );
    }

    pub(crate) fn draw_version_info(&mut self) {
        let Some(ver_info) = self.ver.info() else {
            return;
        };
        self.draw_number(
            ver_info,
            VERSION_INFO_BIT_LEN,
            Module::Version(Color::Light),
            Module::Version(Color::Dark),
            &VERSION_INFO_COORDS_BL,
        );
        self.draw_number(
            ver_info,
            VERSION_INFO_BIT_LEN,
            Module::Version(Color::Light),
            Module::Version(Color::Dark),
            &VERSION_INFO_COORDS_TR,
        );
    }

    // Most significant bit goes to the first coordinate
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            if number & mask == 0 {
                self.set(*r, *c, off_clr);
            } else {
                self.set(*r, *c, on_clr);
            }
            mask >>= 1;
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_patterns();
        self.draw_dark_module();
        self.reserve_format_area();
        self.reserve_version_area();
    }
}

#[cfg(test)]
mod all_function_patterns_tests {
    use crate::builder::QR;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_encoding_region_size() {
        for ver in Version::all() {
            let mut qr = QR::new(ver, ECLevel::L);
            qr.draw_all_function_patterns();
            let empty = qr.modules().iter().filter(|m| !m.is_functional()).count();
            assert_eq!(empty, ver.payload_bit_len(), "Version {}", *ver);
        }
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    // Walks the zigzag and fills each empty module with the next payload bit.
    // Function modules are passed over and never written.
    pub(crate) fn draw_payload(&mut self, payload: &BitStream) -> QRResult<()> {
        let mut bits = payload.iter();
        for (r, c) in EncRegionIter::new(self.ver) {
            if !matches!(self.get(r, c), Module::Empty) {
                continue;
            }
            let bit = bits.next().ok_or(QRError::GridOverflow)?;
            self.set(r, c, Module::Data(Color::from(bit)));
        }
        if bits.next().is_some() {
            return Err(QRError::DataOverflow);
        }
        Ok(())
    }

    pub(crate) fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_functions();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r, c) {
                    if let Module::Data(clr) = self.get(r, c) {
                        self.set(r, c, Module::Data(!clr))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod encoding_region_tests {
    use crate::builder::{Module, QR};
    use crate::common::bitstream::BitStream;
    use crate::common::error::QRError;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{Color, ECLevel, Version};

    fn prepared_qr(ver: Version) -> QR {
        let mut qr = QR::new(ver, ECLevel::L);
        qr.draw_all_function_patterns();
        qr
    }

    fn payload(len: usize) -> BitStream {
        let mut bs = BitStream::new(len);
        (0..len).for_each(|i| bs.push(i % 3 == 0));
        bs
    }

    #[test]
    fn test_draw_payload_fills_region() {
        for ver in Version::all() {
            let mut qr = prepared_qr(ver);
            let before = qr.clone();
            qr.draw_payload(&payload(ver.payload_bit_len())).unwrap();

            assert!(!qr.modules().contains(&Module::Empty));
            for (a, b) in before.modules().iter().zip(qr.modules()) {
                if a.is_functional() {
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_draw_payload_order() {
        let mut qr = prepared_qr(Version::MIN);
        let mut bs = BitStream::new(Version::MIN.payload_bit_len());
        bs.push_bits(0b1011, 4);
        (4..bs.capacity()).for_each(|_| bs.push(false));
        qr.draw_payload(&bs).unwrap();
        assert_eq!(qr.get(20, 20), Module::Data(Color::Dark));
        assert_eq!(qr.get(20, 19), Module::Data(Color::Light));
        assert_eq!(qr.get(19, 20), Module::Data(Color::Dark));
        assert_eq!(qr.get(19, 19), Module::Data(Color::Dark));
    }

    #[test]
    fn test_draw_payload_data_overflow() {
        let ver = Version::new(2).unwrap();
        let mut qr = prepared_qr(ver);
        let res = qr.draw_payload(&payload(ver.payload_bit_len() + 1));
        assert_eq!(res, Err(QRError::DataOverflow));
    }

    #[test]
    fn test_draw_payload_grid_overflow() {
        let ver = Version::new(2).unwrap();
        let mut qr = prepared_qr(ver);
        let res = qr.draw_payload(&payload(ver.payload_bit_len() - 7));
        assert_eq!(res, Err(QRError::GridOverflow));
    }

    #[test]
    fn test_apply_mask_is_involution() {
        let ver = Version::new(3).unwrap();
        let mut qr = prepared_qr(ver);
        qr.draw_payload(&payload(ver.payload_bit_len())).unwrap();
        let orig = qr.modules().to_vec();
        for m in MaskPattern::all() {
            let mut masked = qr.clone();
            masked.apply_mask(m);
            assert_eq!(masked.mask(), Some(m));
            let changed = masked.modules().iter().zip(orig.iter()).filter(|(a, b)| a != b);
            assert!(changed.clone().all(|(a, _)| matches!(a, Module::Data(_))));
            assert!(changed.count() > 0);
            masked.apply_mask(m);
            assert_eq!(masked.modules(), &orig[..]);
        }
    }
}

// Render
//------------------------------------------------------------------------------

static QUIET_ZONE_WIDTH: usize = 4;

impl QR {
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE_WIDTH as u32 * module_sz;
        let qr_sz = self.w as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        GrayImage::from_fn(total_sz, total_sz, |j, i| {
            if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                return Luma([255]);
            }
            let r = (i - qz_sz) / module_sz;
            let c = (j - qz_sz) / module_sz;
            self.get(r as i16, c as i16).select(Luma([0]), Luma([255]))
        })
    }

    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE_WIDTH * module_sz;
        let qr_sz = self.w * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::new();
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as i16;
                let c = ((j - qz_sz) / module_sz) as i16;
                canvas.push(self.get(r, c).select(' ', '█'));
            }
            canvas.push('\n');
        }

        canvas
    }
}
