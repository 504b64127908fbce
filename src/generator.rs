use crate::charset::{ActiveClass, CharacterSetOptions, class_index_of};
use crate::error::{Result, Violation};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const DIGEST_LEN: usize = 32;
pub const HEX_LEN: usize = DIGEST_LEN * 2;

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivationInput {
    pub simple_password: String,
    pub unique_key: String,
    pub length: usize,
}

impl DerivationInput {
    pub fn new(simple_password: impl Into<String>, unique_key: impl Into<String>, length: usize) -> Self {
        Self {
            simple_password: simple_password.into(),
            unique_key: unique_key.into(),
            length,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.simple_password.is_empty() {
            return Err(Violation::EmptySimplePassword.into());
        }
        if self.unique_key.is_empty() {
            return Err(Violation::EmptyUniqueKey.into());
        }
        if self.length < 1 {
            return Err(Violation::ZeroLength.into());
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationInput")
            .field("simple_password", &"<redacted>")
            .field("unique_key", &"<redacted>")
            .field("length", &self.length)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedPassword {
    value: String,
    source_hash_hex: String,
}

impl DerivedPassword {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn source_hash_hex(&self) -> &str {
        &self.source_hash_hex
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }
}

impl fmt::Debug for DerivedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedPassword")
            .field("value", &"<redacted>")
            .field("source_hash_hex", &"<redacted>")
            .finish()
    }
}

pub struct SourceHash {
    digest: Zeroizing<[u8; DIGEST_LEN]>,
}

impl SourceHash {
    pub fn compute(simple_password: &str, unique_key: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(simple_password.as_bytes());
        hasher.update(unique_key.as_bytes());

        let mut digest = Zeroizing::new([0u8; DIGEST_LEN]);
        hasher.finalize_into((&mut *digest).into());

        Self { digest }
    }

    pub fn nibble(&self, index: usize) -> u8 {
        let index = index % HEX_LEN;
        let byte = self.digest[index / 2];
        if index % 2 == 0 { byte >> 4 } else { byte & 0x0f }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.digest[..])
    }
}

pub fn stretch(hash: &SourceHash, length: usize) -> Zeroizing<Vec<u8>> {
    let digits: Zeroizing<Vec<u8>> = Zeroizing::new((0..HEX_LEN).map(|i| hash.nibble(i)).collect());

    let mut working = Zeroizing::new(Vec::with_capacity(length));
    while working.len() < length {
        let take = (length - working.len()).min(HEX_LEN);
        working.extend_from_slice(&digits[..take]);
    }

    working
}

pub fn map_positions(working: &[u8], classes: &[ActiveClass]) -> Zeroizing<Vec<char>> {
    let mut buffer = Zeroizing::new(Vec::with_capacity(working.len()));
    if classes.is_empty() {
        return buffer;
    }

    for (position, &nibble) in working.iter().enumerate() {
        let active = &classes[nibble as usize % classes.len()];
        buffer.push(active.pick(nibble, position));
    }

    buffer
}

pub fn enforce_diversity(buffer: &mut [char], hash: &SourceHash, classes: &[ActiveClass]) {
    let length = buffer.len();
    if length == 0 {
        return;
    }

    let mut counts = vec![0usize; classes.len()];
    for &ch in buffer.iter() {
        if let Some(owner) = class_index_of(classes, ch) {
            counts[owner] += 1;
        }
    }

    for (k, active) in classes.iter().enumerate() {
        if counts[k] > 0 {
            continue;
        }

        // scan from digest byte k; prefer foreign or duplicated slots, then lower priority classes
        let start = (hash.nibble(2 * k) as usize * 16 + hash.nibble(2 * k + 1) as usize) % length;
        let scan = || (0..length).map(move |step| (start + step) % length);

        let spare = scan().find(|&pos| match class_index_of(classes, buffer[pos]) {
            None => true,
            Some(owner) => counts[owner] > 1,
        });
        let target = spare.or_else(|| {
            scan().find(|&pos| class_index_of(classes, buffer[pos]).is_some_and(|owner| owner > k))
        });

        let Some(pos) = target else {
            continue;
        };

        if let Some(owner) = class_index_of(classes, buffer[pos]) {
            counts[owner] -= 1;
        }
        buffer[pos] = active.pick(hash.nibble(pos), pos);
        counts[k] += 1;
    }
}

pub fn derive(input: &DerivationInput, options: &CharacterSetOptions) -> Result<DerivedPassword> {
    input.validate()?;
    let classes = options.active_classes()?;

    let hash = SourceHash::compute(&input.simple_password, &input.unique_key);
    let working = stretch(&hash, input.length);

    let mut buffer = map_positions(&working, &classes);
    enforce_diversity(&mut buffer, &hash, &classes);

    Ok(DerivedPassword {
        value: buffer.iter().collect(),
        source_hash_hex: hash.to_hex(),
    })
}
