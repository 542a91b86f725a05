//! # Special Tokens

/// The number of reserved special tokens.
pub const NUM_SPECIAL_TOKENS: usize = 4;

/// The reserved special tokens, at fixed ids `0..NUM_SPECIAL_TOKENS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecialToken {
    /// Unknown input; id 0.
    Unk,
    /// Padding; id 1.
    Pad,
    /// Beginning of sequence; id 2.
    Bos,
    /// End of sequence; id 3.
    Eos,
}

impl SpecialToken {
    /// All special tokens, in id order.
    pub const ALL: [SpecialToken; NUM_SPECIAL_TOKENS] = [
        SpecialToken::Unk,
        SpecialToken::Pad,
        SpecialToken::Bos,
        SpecialToken::Eos,
    ];

    /// The surface string of the token.
    pub const fn as_str(self) -> &'static str {
        match self {
            SpecialToken::Unk => "<UNK>",
            SpecialToken::Pad => "<PAD>",
            SpecialToken::Bos => "<BOS>",
            SpecialToken::Eos => "<EOS>",
        }
    }

    /// The fixed id of the token.
    pub const fn id(self) -> usize {
        self as usize
    }

    /// Look up a special token by surface string.
    pub fn lookup(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_ids() {
        for (idx, special) in SpecialToken::ALL.iter().enumerate() {
            assert_eq!(special.id(), idx);
            assert_eq!(SpecialToken::lookup(special.as_str()), Some(*special));
        }
        assert_eq!(SpecialToken::Unk.as_str(), "<UNK>");
        assert_eq!(SpecialToken::Eos.id(), 3);
        assert_eq!(SpecialToken::lookup("<MASK>"), None);
    }
}
