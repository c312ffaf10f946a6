/// A read-only view of a contiguous block of bytes.
///
/// This is the minimal interface that payload-carrying listeners agree on: they need to know how
/// many bytes there are and be able to look at them, nothing else. The provided methods derive
/// everything from [`as_bytes()`][Self::as_bytes].
///
/// # Example
///
/// ```
/// use listeners::Blob;
///
/// fn describe(payload: &dyn Blob) -> String {
///     if payload.is_empty() {
///         "nothing".to_owned()
///     } else {
///         format!("{} bytes", payload.len())
///     }
/// }
///
/// assert_eq!(describe(&vec![1_u8, 2, 3]), "3 bytes");
/// assert_eq!(describe(&String::new()), "nothing");
/// ```
pub trait Blob {
    /// The bytes. An absent payload is an empty slice.
    fn as_bytes(&self) -> &[u8];

    /// Number of bytes.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether there are no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Blob for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> Blob for [u8; N] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl Blob for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl Blob for Box<[u8]> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl Blob for str {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl Blob for String {
    fn as_bytes(&self) -> &[u8] {
        String::as_bytes(self)
    }
}

impl<B: Blob + ?Sized> Blob for &B {
    fn as_bytes(&self) -> &[u8] {
        (**self).as_bytes()
    }
}
