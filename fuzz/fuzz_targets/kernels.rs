//! Cross-tier equivalence fuzzing.
//!
//! Runs each operation at every tier the CPU supports and requires
//! bit-identical output. This catches:
//!
//! - Tail handling bugs at register boundaries
//! - Lane-width mistakes in a single tier
//! - Count masking differences between vector and scalar shifts
//!
//! The oracle is the scalar loop, which is correct by inspection.

#![no_main]

use arbitrary::Arbitrary;
use lanewise::{
  Add, AddSaturating, And, AndNot, Element, Multiply, MultiplyLow, MultiplyWidening, Operand, Or, ShiftLeft,
  ShiftLeftVariable, ShiftRightArithmetic, ShiftRightArithmeticVariable, ShiftRightLogical, ShiftRightLogicalVariable,
  Subtract, Xor,
  __internal::kernel_test::{KernelResult, first_mismatch, run_all_binary, run_all_bitwise, run_all_shift, run_all_widen},
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  broadcast: bool,
  count: u32,
}

fuzz_target!(|input: Input| {
  let half = input.data.len() / 2;
  let (a, b) = input.data.split_at(half);

  check_8(a, b, input.broadcast, input.count);
  check_16(a, b, input.broadcast, input.count);
  check_32(a, b, input.broadcast, input.count);
  check_64(a, b, input.broadcast, input.count);
  check_float(a, b, input.broadcast);
});

macro_rules! decode {
  ($t:ty, $bytes:expr) => {
    $bytes
      .chunks_exact(core::mem::size_of::<$t>())
      .map(|c| {
        let mut raw = [0u8; core::mem::size_of::<$t>()];
        raw.copy_from_slice(c);
        <$t>::from_le_bytes(raw)
      })
      .collect::<Vec<$t>>()
  };
}

fn assert_agree<T: Element>(results: &[KernelResult<T>], what: &str, len: usize) {
  if let Some((tier, index)) = first_mismatch(results) {
    panic!(
      "{what}<{}> mismatch at tier {tier}, index {index}, len={len}: oracle={:?} got={:?}",
      T::NAME,
      results[0].output[index],
      results.iter().find(|r| r.tier == tier).map(|r| r.output[index])
    );
  }
}

fn operand<'a, T: Element>(a: &[T], b: &'a [T], broadcast: bool) -> Operand<'a, T> {
  match b.first() {
    Some(&s) if broadcast => Operand::Scalar(s),
    _ => Operand::Buffer(&b[..a.len().min(b.len())]),
  }
}

macro_rules! binary {
  ($t:ty, $a:expr, $b:expr, $broadcast:expr, [$($op:ident),+]) => {{
    let a: &[$t] = $a;
    let b: &[$t] = $b;
    let a = &a[..a.len().min(b.len())];
    $(
      assert_agree(&run_all_binary::<$t, $op>(a, operand(a, b, $broadcast)), stringify!($op), a.len());
    )+
  }};
}

macro_rules! bitwise {
  ($t:ty, $a:expr, $b:expr, $broadcast:expr) => {{
    let a: &[$t] = $a;
    let b: &[$t] = $b;
    let a = &a[..a.len().min(b.len())];
    assert_agree(&run_all_bitwise::<$t, And>(a, operand(a, b, $broadcast)), "and", a.len());
    assert_agree(&run_all_bitwise::<$t, Or>(a, operand(a, b, $broadcast)), "or", a.len());
    assert_agree(&run_all_bitwise::<$t, Xor>(a, operand(a, b, $broadcast)), "xor", a.len());
    assert_agree(&run_all_bitwise::<$t, AndNot>(a, operand(a, b, $broadcast)), "and_not", a.len());
  }};
}

macro_rules! shifts {
  ($t:ty, $a:expr, $count:expr, [$($op:ident),+]) => {{
    let a: &[$t] = $a;
    $(
      assert_agree(&run_all_shift::<$t, $op>(a, $count), stringify!($op), a.len());
    )+
  }};
}

fn check_8(a: &[u8], b: &[u8], broadcast: bool, count: u32) {
  let (sa, sb) = (decode!(i8, a), decode!(i8, b));
  binary!(u8, a, b, broadcast, [Add, Subtract, AddSaturating, MultiplyLow]);
  binary!(i8, &sa, &sb, broadcast, [Add, Subtract, AddSaturating, MultiplyLow]);
  bitwise!(i8, &sa, &sb, broadcast);
  shifts!(u8, a, count, [ShiftLeft, ShiftRightLogical]);
  shifts!(i8, &sa, count, [ShiftRightArithmetic]);
}

fn check_16(a: &[u8], b: &[u8], broadcast: bool, count: u32) {
  let (ua, ub) = (decode!(u16, a), decode!(u16, b));
  let (sa, sb) = (decode!(i16, a), decode!(i16, b));
  binary!(u16, &ua, &ub, broadcast, [Add, Subtract, AddSaturating, MultiplyLow]);
  binary!(i16, &sa, &sb, broadcast, [Add, Subtract, AddSaturating, MultiplyLow]);
  bitwise!(u16, &ua, &ub, broadcast);
  shifts!(u16, &ua, count, [ShiftLeft, ShiftRightLogical]);
  shifts!(i16, &sa, count, [ShiftLeft, ShiftRightLogical, ShiftRightArithmetic]);
}

fn check_32(a: &[u8], b: &[u8], broadcast: bool, count: u32) {
  let (ua, ub) = (decode!(u32, a), decode!(u32, b));
  let (sa, sb) = (decode!(i32, a), decode!(i32, b));
  binary!(
    u32,
    &ua,
    &ub,
    broadcast,
    [Add, Subtract, MultiplyLow, ShiftLeftVariable, ShiftRightLogicalVariable]
  );
  binary!(
    i32,
    &sa,
    &sb,
    broadcast,
    [Add, MultiplyLow, ShiftLeftVariable, ShiftRightLogicalVariable, ShiftRightArithmeticVariable]
  );
  bitwise!(u32, &ua, &ub, broadcast);
  shifts!(u32, &ua, count, [ShiftLeft, ShiftRightLogical]);
  shifts!(i32, &sa, count, [ShiftRightArithmetic]);

  let n = sa.len().min(sb.len());
  assert_agree(
    &run_all_widen::<i32, MultiplyWidening>(&sa[..n], operand(&sa[..n], &sb, broadcast)),
    "multiply_widening",
    n,
  );
  let n = ua.len().min(ub.len());
  assert_agree(
    &run_all_widen::<u32, MultiplyWidening>(&ua[..n], operand(&ua[..n], &ub, broadcast)),
    "multiply_widening",
    n,
  );
}

fn check_64(a: &[u8], b: &[u8], broadcast: bool, count: u32) {
  let (ua, ub) = (decode!(u64, a), decode!(u64, b));
  let (sa, sb) = (decode!(i64, a), decode!(i64, b));
  binary!(
    u64,
    &ua,
    &ub,
    broadcast,
    [Add, Subtract, MultiplyLow, ShiftLeftVariable, ShiftRightLogicalVariable]
  );
  binary!(i64, &sa, &sb, broadcast, [Subtract, MultiplyLow, ShiftRightArithmeticVariable]);
  bitwise!(u64, &ua, &ub, broadcast);
  shifts!(u64, &ua, count, [ShiftLeft, ShiftRightLogical]);
  shifts!(i64, &sa, count, [ShiftRightArithmetic]);
}

fn check_float(a: &[u8], b: &[u8], broadcast: bool) {
  // NaN payload propagation is not part of the contract; keep arithmetic finite.
  let fa: Vec<f32> = decode!(f32, a).into_iter().filter(|v| v.is_finite()).collect();
  let fb: Vec<f32> = decode!(f32, b).into_iter().filter(|v| v.is_finite()).collect();
  binary!(f32, &fa, &fb, broadcast, [Add, Subtract, Multiply]);
  bitwise!(f32, &decode!(f32, a), &decode!(f32, b), broadcast);

  let da: Vec<f64> = decode!(f64, a).into_iter().filter(|v| v.is_finite()).collect();
  let db: Vec<f64> = decode!(f64, b).into_iter().filter(|v| v.is_finite()).collect();
  binary!(f64, &da, &db, broadcast, [Add, Subtract, Multiply]);
  bitwise!(f64, &decode!(f64, a), &decode!(f64, b), broadcast);
}
