use std::fmt;

/// A handle to an item owned by a [`Packer`][crate::Packer].
///
/// Ids are indices into the packer's item arena. They stay valid until the
/// item is removed and are never handed out twice by the same packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(usize);

impl ItemId {
    pub(crate) fn new(index: usize) -> Self {
        ItemId(index)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}
