//! The encoding dictionary.
use crate::{Code, MAX_CODESIZE, MAX_ENTRIES};

/// Marks an unused slot of a full successor table.
const NO_CODE: Code = Code::MAX;

/// One tree node for at most each code.
/// To avoid using too much memory we keep nodes with few successors in optimized form. This form
/// doesn't offer lookup by indexing but instead does a linear search.
pub(crate) struct Tree {
    simples: Vec<Simple>,
    complex: Vec<Full>,
    keys: Vec<CompressedKey>,
}

#[derive(Clone, Copy)]
enum FullKey {
    NoSuccessor,
    Simple(u16),
    Full(u16),
}

#[derive(Clone, Copy)]
struct CompressedKey(u16);

const SHORT: usize = 16;

#[derive(Clone, Copy)]
struct Simple {
    codes: [Code; SHORT],
    chars: [u8; SHORT],
    count: u8,
}

#[derive(Clone, Copy)]
struct Full {
    char_continuation: [Code; 256],
}

impl Tree {
    pub(crate) fn new(min_size: u8) -> Self {
        let mut tree = Tree {
            simples: Vec::new(),
            complex: Vec::new(),
            keys: Vec::with_capacity(MAX_ENTRIES + 1),
        };
        tree.reset(min_size);
        tree
    }

    /// Forget all strings, only the single symbols and the two control codes remain.
    pub(crate) fn reset(&mut self, min_size: u8) {
        self.simples.clear();
        self.complex.clear();
        self.keys.clear();
        self.keys.resize((1 << min_size) + 2, FullKey::NoSuccessor.into());
    }

    /// The code assigned by the next call to `insert`.
    pub(crate) fn next_code(&self) -> usize {
        self.keys.len()
    }

    /// Find the code of the string `prefix` extended by `ch`.
    ///
    /// Without a prefix this is the string made only of `ch`.
    pub(crate) fn find(&self, prefix: Option<Code>, ch: u8) -> Option<Code> {
        let code = match prefix {
            None => return Some(Code::from(ch)),
            Some(code) => code,
        };

        let key = self.keys[usize::from(code)];
        match FullKey::from(key) {
            FullKey::NoSuccessor => None,
            FullKey::Simple(idx) => {
                let nexts = &self.simples[usize::from(idx)];
                let successors = nexts.codes.iter().zip(nexts.chars.iter())
                    .take(usize::from(nexts.count));
                for (&scode, &sch) in successors {
                    if sch == ch {
                        return Some(scode);
                    }
                }

                None
            },
            FullKey::Full(idx) => {
                let full = &self.complex[usize::from(idx)];
                let precode = full.char_continuation[usize::from(ch)];
                if precode != NO_CODE {
                    Some(precode)
                } else {
                    None
                }
            },
        }
    }

    /// Add the string `code` extended by `ch`, which must not exist yet.
    pub(crate) fn insert(&mut self, code: Code, ch: u8) -> Code {
        debug_assert!(self.find(Some(code), ch).is_none(), "duplicate string {}+{}", code, ch);
        debug_assert!(self.keys.len() <= MAX_ENTRIES, "dictionary was not reset");
        let next: Code = self.keys.len() as Code;
        let key = self.keys[usize::from(code)];
        match FullKey::from(key) {
            FullKey::NoSuccessor => {
                let new_key = FullKey::Simple(self.simples.len() as u16);
                let mut simple = Simple::default();
                simple.codes[0] = next;
                simple.chars[0] = ch;
                simple.count = 1;
                self.simples.push(simple);
                self.keys[usize::from(code)] = new_key.into();
            }
            FullKey::Simple(idx) if usize::from(self.simples[usize::from(idx)].count) < SHORT => {
                let nexts = &mut self.simples[usize::from(idx)];
                let nidx = usize::from(nexts.count);
                nexts.chars[nidx] = ch;
                nexts.codes[nidx] = next;
                nexts.count += 1;
            }
            FullKey::Simple(idx) => {
                let new_key = FullKey::Full(self.complex.len() as u16);
                let simples = &self.simples[usize::from(idx)];
                let mut full = Full {
                    char_continuation: [NO_CODE; 256],
                };
                for (&pch, &pcont) in simples.chars.iter().zip(simples.codes.iter()) {
                    full.char_continuation[usize::from(pch)] = pcont;
                }
                full.char_continuation[usize::from(ch)] = next;
                self.complex.push(full);
                self.keys[usize::from(code)] = new_key.into();
            }
            FullKey::Full(idx) => {
                let full = &mut self.complex[usize::from(idx)];
                full.char_continuation[usize::from(ch)] = next;
            }
        }
        self.keys.push(FullKey::NoSuccessor.into());
        next
    }
}

impl Default for Simple {
    fn default() -> Self {
        Simple {
            codes: [0; SHORT],
            chars: [0; SHORT],
            count: 0,
        }
    }
}

impl From<CompressedKey> for FullKey {
    fn from(CompressedKey(key): CompressedKey) -> Self {
        match (key >> MAX_CODESIZE) & 0xf {
            0 => FullKey::Full(key & 0xfff),
            1 => FullKey::Simple(key & 0xfff),
            _ => FullKey::NoSuccessor,
        }
    }
}

impl From<FullKey> for CompressedKey {
    fn from(full: FullKey) -> Self {
        CompressedKey(match full {
            FullKey::NoSuccessor => 0x2000,
            FullKey::Simple(code) => 0x1000 | code,
            FullKey::Full(code) => code,
        })
    }
}
