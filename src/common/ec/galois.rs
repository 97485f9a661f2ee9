use std::ops::{Add, AddAssign, Mul, MulAssign};

// GF(256) element under x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct G(pub u8);

impl G {
    // α^i, where α = 2 is the primitive element
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }

    pub fn log(self) -> usize {
        debug_assert!(self.0 != 0, "Log of zero is undefined");
        LOG_TABLE[self.0 as usize] as usize
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        if self.0 == 0 || rhs.0 == 0 {
            return Self(0);
        }
        Self::gen_pow(self.log() + rhs.log())
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}


// Polynomials
//------------------------------------------------------------------------------
// Coefficients are ordered from the highest degree term

pub fn poly_mul(a: &[G], b: &[G]) -> Vec<G> {
    let mut res = vec![G(0); a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            res[i + j] += x * y;
        }
    }
    res
}

// Synthetic division by a monic divisor. Each step scales the divisor by the
// leading term, adds it to the running remainder and drops the zeroed lead.
pub fn poly_rem(num: &[G], den: &[G]) -> Vec<G> {
    debug_assert_eq!(den.first(), Some(&G(1)), "Divisor should be monic");

    let deg = den.len() - 1;
    let steps = num.len().saturating_sub(deg);
    (0..steps).fold(num.to_vec(), |rem, _| {
        let lead = rem[0];
        let scaled = den[1..].iter().map(|&d| d * lead).chain(std::iter::repeat(G(0)));
        rem[1..].iter().zip(scaled).map(|(&r, s)| r + s).collect()
    })
}

pub fn eval_poly(poly: &[G], x: G) -> G {
    poly.iter().fold(G(0), |acc, &c| acc * x + c)
}


// Global constants
//------------------------------------------------------------------------------

const PRIMITIVE_POLY: u16 = 0x11d;

pub static EXP_TABLE: [u8; 256] = build_exp_table();

pub static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    table[255] = table[0];
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}
