mod galois;

pub(crate) use galois::*;

use std::sync::LazyLock;

pub static MIN_EC_SIZE: usize = 7;

pub static MAX_EC_SIZE: usize = 30;

// Generator polynomials indexed by degree, built once on first use
static GENERATOR_POLYNOMIALS: LazyLock<Vec<Vec<G>>> =
    LazyLock::new(|| (0..=MAX_EC_SIZE).map(generator_poly).collect());

// (x - α^0)(x - α^1)...(x - α^(degree-1))
pub fn generator_poly(degree: usize) -> Vec<G> {
    (0..degree).fold(vec![G(1)], |acc, i| poly_mul(&acc, &[G(1), G::gen_pow(i)]))
}

// Remainder of data(x) * x^ecc_count divided by the generator polynomial
pub fn ecc(data: &[u8], ecc_count: usize) -> Vec<u8> {
    debug_assert!(
        (MIN_EC_SIZE..=MAX_EC_SIZE).contains(&ecc_count),
        "Unsupported ecc count: {ecc_count}"
    );

    let gen = &GENERATOR_POLYNOMIALS[ecc_count];
    let mut num = data.iter().map(|&b| G(b)).collect::<Vec<_>>();
    num.resize(data.len() + ecc_count, G(0));

    poly_rem(&num, gen).into_iter().map(u8::from).collect()
}

#[cfg(test)]
mod ec_tests {
    use test_case::test_case;

    use super::{ecc, eval_poly, generator_poly, G, MAX_EC_SIZE, MIN_EC_SIZE};

    #[test]
    fn test_generator_poly() {
        // x^2 + 3x + 2
        assert_eq!(generator_poly(2), [G(1), G(3), G(2)]);

        let gen = generator_poly(7);
        let exps = gen.iter().map(|g| g.log()).collect::<Vec<_>>();
        assert_eq!(exps, [0, 87, 229, 146, 149, 238, 102, 21]);
    }

    #[test]
    fn test_generator_poly_roots() {
        for degree in MIN_EC_SIZE..=MAX_EC_SIZE {
            let gen = generator_poly(degree);
            assert_eq!(gen.len(), degree + 1);
            for i in 0..degree {
                assert_eq!(eval_poly(&gen, G::gen_pow(i)), G(0), "Degree {degree}, root {i}");
            }
        }
    }

    #[test]
    fn test_poly_mod_1() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test_case(b"HELLO".to_vec(), 7)]
    #[test_case(vec![0; 19], 7)]
    #[test_case((0..=255).collect(), 22)]
    #[test_case(vec![0xff; 43], 28)]
    #[test_case((0..116).map(|i| (i * 7) as u8).collect(), 30)]
    fn test_codeword_syndromes_vanish(data: Vec<u8>, ecc_count: usize) {
        let ec = ecc(&data, ecc_count);
        assert_eq!(ec.len(), ecc_count);

        let cw = data.iter().chain(ec.iter()).map(|&b| G(b)).collect::<Vec<_>>();
        for i in 0..ecc_count {
            assert_eq!(eval_poly(&cw, G::gen_pow(i)), G(0), "Syndrome {i}");
        }
    }

    #[test]
    fn test_generator_poly_table_covers_max_degree() {
        let gen = &super::GENERATOR_POLYNOMIALS[MAX_EC_SIZE];
        assert_eq!(gen.len(), MAX_EC_SIZE + 1);
        assert_eq!(ecc(&[0xa5; 116], MAX_EC_SIZE).len(), 30);
    }

    #[test]
    fn test_ecc_of_zero_block() {
        assert_eq!(ecc(&[0; 16], 10), [0; 10]);
    }
}
