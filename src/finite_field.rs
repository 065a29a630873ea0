//! Arithmetic in the field of nimbers below 256.
//!
//! Addition is XOR. Multiplication is nim-multiplication, fixed by the products
//! of the eight powers of two in [`POWER_TABLE`] and extended to every pair of
//! bytes by distributivity over XOR.

use once_cell::sync::Lazy;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Nim products of the powers of two `1 << i` and `1 << j`.
const POWER_TABLE: [[u8; 8]; 8] = [
    [1, 2, 4, 8, 16, 32, 64, 128],
    [2, 3, 8, 12, 32, 48, 128, 192],
    [4, 8, 6, 11, 64, 128, 96, 176],
    [8, 12, 11, 13, 128, 192, 176, 208],
    [16, 32, 64, 128, 24, 44, 75, 141],
    [32, 48, 128, 192, 44, 52, 141, 198],
    [64, 128, 96, 176, 75, 141, 103, 185],
    [128, 192, 176, 208, 141, 198, 185, 222],
];

static TABLES: Lazy<FieldTables> = Lazy::new(FieldTables::build);

/// Returns the process-wide field tables, building them on first use.
///
/// Construction happens at most once; concurrent first callers block until
/// the tables are complete.
pub fn tables() -> &'static FieldTables {
    &TABLES
}

/// Nim product computed bit by bit from [`POWER_TABLE`]
fn nim_multiply_slow(a: u8, b: u8) -> u8 {
    let mut product = 0u8;
    for i in 0..8 {
        if (a >> i) & 1 == 0 {
            continue;
        }
        for j in 0..8 {
            if (b >> j) & 1 != 0 {
                product ^= POWER_TABLE[i][j];
            }
        }
    }
    product
}

/// Precomputed multiplication and inversion tables
pub struct FieldTables {
    mul: Box<[[u8; 256]]>,
    inv: [u8; 256],
}

impl FieldTables {
    /// Builds the full 256x256 product table and the inverse table
    pub fn build() -> Self {
        let mut mul = vec![[0u8; 256]; 256].into_boxed_slice();
        for (a, row) in mul.iter_mut().enumerate() {
            for (b, cell) in row.iter_mut().enumerate() {
                *cell = nim_multiply_slow(a as u8, b as u8);
            }
        }

        // inv[0] is never read
        let mut inv = [0u8; 256];
        for a in 1..256 {
            inv[a] = mul[a]
                .iter()
                .position(|&p| p == 1)
                .map(|b| b as u8)
                .unwrap_or(0);
        }

        Self { mul, inv }
    }

    #[inline]
    pub fn multiply(&self, a: u8, b: u8) -> u8 {
        self.mul[a as usize][b as usize]
    }

    /// Multiplicative inverse of a nonzero element.
    ///
    /// Returns 0 for 0; callers only invert differences of distinct points.
    #[inline]
    pub fn invert(&self, a: u8) -> u8 {
        self.inv[a as usize]
    }

    /// All products `a * x` indexed by `x`
    #[inline]
    pub fn mul_row(&self, a: u8) -> &[u8; 256] {
        &self.mul[a as usize]
    }
}

impl fmt::Debug for FieldTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTables").finish_non_exhaustive()
    }
}

/// An element of the nimber field of order 256
///
/// # Example
/// ```
/// use nimshare::Nimber;
///
/// let a = Nimber::new(2);
/// assert_eq!(a * a, Nimber::new(3));
/// assert_eq!(a + a, Nimber::zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nimber(pub u8);

impl Nimber {
    #[inline]
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub fn one() -> Self {
        Self(1)
    }

    #[inline]
    pub fn multiply(self, other: Self) -> Self {
        Self(tables().multiply(self.0, other.0))
    }

    /// Computes exponentiation using square-and-multiply
    ///
    /// # Example
    /// ```
    /// use nimshare::Nimber;
    ///
    /// let base = Nimber::new(0x03);
    /// assert_eq!(base.exp(3), base * base * base);
    /// ```
    #[inline]
    pub fn exp(self, mut exp: u32) -> Self {
        let mut result = Self::one();
        let mut base = self;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.multiply(base);
            }
            base = base.multiply(base);
            exp >>= 1;
        }
        result
    }

    /// Multiplicative inverse, `None` for zero
    ///
    /// # Example
    /// ```
    /// use nimshare::Nimber;
    ///
    /// let a = Nimber::new(16);
    /// let inv = a.inverse().unwrap();
    /// assert_eq!(a * inv, Nimber::one());
    /// ```
    #[inline]
    pub fn inverse(self) -> Option<Self> {
        if self.0 == 0 {
            None
        } else {
            Some(Self(tables().invert(self.0)))
        }
    }
}

/// Nim-addition is XOR
impl Add for Nimber {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        #[allow(clippy::suspicious_arithmetic_impl)]
        let result = self.0 ^ other.0;
        Self(result)
    }
}

impl Mul for Nimber {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.multiply(other)
    }
}

impl Sub for Nimber {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        // characteristic 2: subtraction is addition
        #[allow(clippy::suspicious_arithmetic_impl)]
        let result = self.add(other);
        result
    }
}
