//! Fixed-capacity PIN input buffer

use zeroize::Zeroize;

use crate::PIN_BUFFER_CAPACITY;

/// Bounded digit buffer reused across PIN entry sessions
///
/// `CAP` counts a terminator slot, so at most `CAP - 1` digits are held.
/// Digits are stored as ASCII. Clearing wipes the storage, and so does drop.
pub struct PinBuffer<const CAP: usize = PIN_BUFFER_CAPACITY> {
    digits: [u8; CAP],
    len: usize,
}

impl<const CAP: usize> PinBuffer<CAP> {
    pub const fn new() -> Self {
        Self {
            digits: [0; CAP],
            len: 0,
        }
    }

    /// Maximum number of digits the buffer accepts
    pub const fn max_digits() -> usize {
        CAP.saturating_sub(1)
    }

    /// Append a digit (0-9). Returns `false` if the buffer is full or the
    /// value is not a digit.
    pub fn push(&mut self, digit: u8) -> bool {
        if digit > 9 || self.len >= Self::max_digits() {
            return false;
        }
        self.digits[self.len] = b'0' + digit;
        self.len += 1;
        true
    }

    /// Byte-for-byte comparison against a PIN
    ///
    /// Not constant-time.
    pub fn matches(&self, pin: &[u8]) -> bool {
        self.as_bytes() == pin
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= Self::max_digits()
    }

    /// Discard all digits and wipe the storage
    pub fn clear(&mut self) {
        self.digits.zeroize();
        self.len = 0;
    }
}

impl<const CAP: usize> Default for PinBuffer<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> Zeroize for PinBuffer<CAP> {
    fn zeroize(&mut self) {
        self.clear();
    }
}

impl<const CAP: usize> Drop for PinBuffer<CAP> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<const CAP: usize> core::fmt::Debug for PinBuffer<CAP> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PinBuffer")
            .field("len", &self.len)
            .field("capacity", &CAP)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_match() {
        let mut buffer: PinBuffer = PinBuffer::new();
        for d in [1, 2, 3, 4] {
            assert!(buffer.push(d));
        }
        assert_eq!(buffer.as_bytes(), b"1234");
        assert!(buffer.matches(b"1234"));
        assert!(!buffer.matches(b"12345"));
        assert!(!buffer.matches(b"123"));
    }

    #[test]
    fn test_default_capacity_holds_31_digits() {
        let mut buffer: PinBuffer = PinBuffer::new();
        for _ in 0..31 {
            assert!(buffer.push(7));
        }
        assert!(buffer.is_full());
        assert!(!buffer.push(7));
        assert_eq!(buffer.len(), 31);
    }

    #[test]
    fn test_rejects_non_digits() {
        let mut buffer = PinBuffer::<4>::new();
        assert!(!buffer.push(10));
        assert!(!buffer.push(200));
        assert!(buffer.push(9));
        assert!(!buffer.push(u8::MAX));
        assert_eq!(buffer.as_bytes(), b"9");
    }

    #[test]
    fn test_small_capacity() {
        let mut buffer = PinBuffer::<3>::new();
        assert!(buffer.push(1));
        assert!(buffer.push(2));
        assert!(!buffer.push(3));
        assert_eq!(buffer.as_bytes(), b"12");
    }

    #[test]
    fn test_clear_wipes_storage() {
        let mut buffer = PinBuffer::<4>::new();
        buffer.push(9);
        buffer.push(8);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.digits, [0; 4]);
    }

    #[test]
    fn test_debug_hides_digits() {
        let mut buffer = PinBuffer::<8>::new();
        buffer.push(4);
        buffer.push(2);
        let rendered = format!("{:?}", buffer);
        assert!(rendered.contains("len: 2"));
        assert!(!rendered.contains("42"));
    }
}
