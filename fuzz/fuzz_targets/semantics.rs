//! Differential fuzzing of the public API against Rust's own operators.
//!
//! Also exercises exact in-place aliasing against the out-of-place result.

#![no_main]

use arbitrary::Arbitrary;
use lanewise::Operand;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  a: Vec<i32>,
  b: Vec<i32>,
  bytes: Vec<u8>,
  count: u32,
}

fuzz_target!(|input: Input| {
  let n = input.a.len().min(input.b.len());
  let (a, b) = (&input.a[..n], &input.b[..n]);

  let mut out = vec![0i32; n];
  lanewise::multiply_low(a, Operand::from(b), &mut out);
  for i in 0..n {
    assert_eq!(out[i], a[i].wrapping_mul(b[i]), "multiply_low index {i}");
  }

  let mut in_place = a.to_vec();
  lanewise::multiply_low_in_place(&mut in_place, Operand::from(b));
  assert_eq!(in_place, out, "multiply_low in place");

  lanewise::shift_right_arithmetic_variable(a, b, &mut out);
  for i in 0..n {
    assert_eq!(out[i], a[i].wrapping_shr(b[i] as u32), "srav index {i}");
  }

  lanewise::shift_left(a, input.count, &mut out);
  for i in 0..n {
    assert_eq!(out[i], a[i].wrapping_shl(input.count), "shift_left index {i}");
  }

  let mut wide = vec![0i64; n];
  lanewise::multiply_widening(a, Operand::from(b), &mut wide);
  for i in 0..n {
    assert_eq!(wide[i], i64::from(a[i]) * i64::from(b[i]), "multiply_widening index {i}");
  }

  let bytes = &input.bytes;
  let mut sat = vec![0u8; bytes.len()];
  let s = bytes.first().copied().unwrap_or(0);
  lanewise::add_saturating(bytes, Operand::Scalar(s), &mut sat);
  for i in 0..bytes.len() {
    assert_eq!(sat[i], bytes[i].saturating_add(s), "add_saturating index {i}");
  }

  let signed: Vec<i8> = bytes.iter().map(|&v| v as i8).collect();
  let mut sat = vec![0i8; signed.len()];
  lanewise::add_saturating(&signed, Operand::from(signed.as_slice()), &mut sat);
  for i in 0..signed.len() {
    assert_eq!(sat[i], signed[i].saturating_add(signed[i]), "add_saturating i8 index {i}");
  }
});
