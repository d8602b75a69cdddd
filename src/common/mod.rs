pub type Byte = u8;

#[inline]
pub fn bit_eq<T: std::ops::BitAnd<Output = T> + PartialEq + Copy>(a: T, b: T) -> bool {
  (a & b) == b
}
