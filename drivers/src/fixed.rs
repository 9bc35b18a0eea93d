/*++

Licensed under the Apache-2.0 license.

File Name:

    fixed.rs

Abstract:

    File contains a two-decimal fixed point display for floats, for use
    with ufmt which has no float support.

--*/

use ufmt::{uDisplay, uWrite, Formatter};

/// Renders a float as `%4d.%02d`: the integer part truncated toward zero and
/// right-aligned to four columns, then the first two decimals truncated.
///
/// The fractional field is always printed without a sign, so `-1.5` renders
/// as `  -1.50`. Values between -1 and 0 lose their sign entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPoint2(pub f32);

impl FixedPoint2 {
    pub fn whole(&self) -> i32 {
        self.0 as i32
    }

    pub fn frac(&self) -> i32 {
        let frac = ((self.0 * 100.0) as i32) % 100;
        // Remainder keeps the dividend's sign
        if frac < 0 {
            -frac
        } else {
            frac
        }
    }
}

fn write_padded<W>(f: &mut Formatter<'_, W>, val: i32, width: usize, pad: char) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    let mut buf = [0u8; 11];
    let mut i = buf.len();
    let mut n = val.unsigned_abs();
    loop {
        i -= 1;
        buf[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    if val < 0 {
        i -= 1;
        buf[i] = b'-';
    }
    for _ in (buf.len() - i)..width {
        f.write_char(pad)?;
    }
    for &c in &buf[i..] {
        f.write_char(c as char)?;
    }
    Ok(())
}

impl uDisplay for FixedPoint2 {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        write_padded(f, self.whole(), 4, ' ')?;
        f.write_char('.')?;
        write_padded(f, self.frac(), 2, '0')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(val: f32) -> String {
        let mut s = String::new();
        ufmt::uwrite!(&mut s, "{}", FixedPoint2(val)).unwrap();
        s
    }

    #[test]
    fn test_positive() {
        assert_eq!(show(3.5), "   3.50");
        assert_eq!(show(2.25), "   2.25");
        assert_eq!(show(5.75), "   5.75");
        assert_eq!(show(0.0), "   0.00");
    }

    #[test]
    fn test_negative_fraction_is_sign_corrected() {
        assert_eq!(FixedPoint2(-1.5).frac(), 50);
        assert_eq!(show(-1.5), "  -1.50");
        assert_eq!(show(-12.25), " -12.25");
    }

    #[test]
    fn test_small_negative_loses_sign() {
        assert_eq!(show(-0.5), "   0.50");
    }

    #[test]
    fn test_wide_values_are_not_truncated() {
        assert_eq!(show(12345.5), "12345.50");
        assert_eq!(show(-1000.75), "-1000.75");
    }

    #[test]
    fn test_fraction_truncates() {
        assert_eq!(show(1.999), "   1.99");
    }
}
