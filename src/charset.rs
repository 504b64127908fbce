use crate::error::{Result, Violation};
use std::collections::BTreeSet;
use std::fmt;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &[u8] = b"0123456789";

pub const DEFAULT_SYMBOLS: &str = "!@#$%^&*()_-+=[]{}|;:,.<>?/";

// Variant order is the class priority and is part of the derivation format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Numbers,
    Symbols,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Numbers,
        CharacterClass::Symbols,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Numbers => "numbers",
            CharacterClass::Symbols => "symbols",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSetOptions {
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub custom_symbols: Option<Vec<char>>,
}

impl Default for CharacterSetOptions {
    fn default() -> Self {
        Self {
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
            custom_symbols: None,
        }
    }
}

impl CharacterSetOptions {
    pub fn without(mut self, class: CharacterClass) -> Self {
        match class {
            CharacterClass::Uppercase => self.include_uppercase = false,
            CharacterClass::Lowercase => self.include_lowercase = false,
            CharacterClass::Numbers => self.include_numbers = false,
            CharacterClass::Symbols => self.include_symbols = false,
        }
        self
    }

    pub fn with_symbols(mut self, symbols: &str) -> Self {
        self.custom_symbols = Some(symbols.chars().collect());
        self
    }

    pub fn is_enabled(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Uppercase => self.include_uppercase,
            CharacterClass::Lowercase => self.include_lowercase,
            CharacterClass::Numbers => self.include_numbers,
            CharacterClass::Symbols => self.include_symbols,
        }
    }

    pub fn enabled_count(&self) -> usize {
        CharacterClass::ALL
            .iter()
            .filter(|&&class| self.is_enabled(class))
            .count()
    }

    pub fn symbols(&self) -> Vec<char> {
        match &self.custom_symbols {
            Some(custom) if !custom.is_empty() => custom.clone(),
            _ => DEFAULT_SYMBOLS.chars().collect(),
        }
    }

    pub fn active_classes(&self) -> Result<Vec<ActiveClass>> {
        let mut active = Vec::with_capacity(CharacterClass::ALL.len());

        for class in CharacterClass::ALL {
            if !self.is_enabled(class) {
                continue;
            }

            let table: Vec<char> = match class {
                CharacterClass::Uppercase => UPPERCASE.iter().map(|&b| b as char).collect(),
                CharacterClass::Lowercase => LOWERCASE.iter().map(|&b| b as char).collect(),
                CharacterClass::Numbers => NUMBERS.iter().map(|&b| b as char).collect(),
                CharacterClass::Symbols => {
                    let symbols = self.symbols();
                    if let Some(&bad) = symbols.iter().find(|c| c.is_ascii_alphanumeric()) {
                        return Err(Violation::AlphanumericSymbol(bad).into());
                    }
                    symbols
                }
            };

            active.push(ActiveClass { class, table });
        }

        if active.is_empty() {
            return Err(Violation::NoCharacterClasses.into());
        }

        Ok(active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveClass {
    pub class: CharacterClass,
    pub table: Vec<char>,
}

impl ActiveClass {
    pub fn contains(&self, ch: char) -> bool {
        self.table.contains(&ch)
    }

    pub fn pick(&self, nibble: u8, position: usize) -> char {
        let index = (nibble as usize * 31 + position) % self.table.len();
        self.table[index]
    }
}

pub fn class_index_of(classes: &[ActiveClass], ch: char) -> Option<usize> {
    classes.iter().position(|active| active.contains(ch))
}

pub fn pool_size(classes: &[ActiveClass]) -> usize {
    classes
        .iter()
        .flat_map(|active| active.table.iter())
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_symbols_size() {
        assert_eq!(DEFAULT_SYMBOLS.chars().count(), 27);
        let unique: BTreeSet<_> = DEFAULT_SYMBOLS.chars().collect();
        assert_eq!(unique.len(), 27, "Default symbols contain duplicates");
        assert!(DEFAULT_SYMBOLS.chars().all(|c| c.is_ascii_punctuation()));
    }

    #[test]
    fn test_active_classes_priority_order() {
        let active = CharacterSetOptions::default().active_classes().unwrap();
        let order: Vec<_> = active.iter().map(|a| a.class).collect();
        assert_eq!(order, CharacterClass::ALL.to_vec());
        assert_eq!(active[0].table.len(), 26);
        assert_eq!(active[1].table.len(), 26);
        assert_eq!(active[2].table.len(), 10);
        assert_eq!(active[3].table.len(), 27);
    }

    #[test]
    fn test_disabled_classes_skipped() {
        let options = CharacterSetOptions::default()
            .without(CharacterClass::Uppercase)
            .without(CharacterClass::Symbols);
        let active = options.active_classes().unwrap();
        let order: Vec<_> = active.iter().map(|a| a.class).collect();
        assert_eq!(order, vec![CharacterClass::Lowercase, CharacterClass::Numbers]);
        assert_eq!(options.enabled_count(), 2);
    }

    #[test]
    fn test_no_classes_rejected() {
        let options = CharacterClass::ALL
            .into_iter()
            .fold(CharacterSetOptions::default(), |o, c| o.without(c));
        assert_eq!(
            options.active_classes(),
            Err(Error::InvalidInput(Violation::NoCharacterClasses))
        );
    }

    #[test]
    fn test_custom_symbols_replace_default() {
        let active = CharacterSetOptions::default()
            .with_symbols("!@#$")
            .active_classes()
            .unwrap();
        assert_eq!(active[3].table, vec!['!', '@', '#', '$']);
    }

    #[test]
    fn test_empty_custom_symbols_fall_back() {
        let options = CharacterSetOptions::default().with_symbols("");
        assert_eq!(options.symbols(), DEFAULT_SYMBOLS.chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_custom_symbols_duplicates_allowed() {
        let active = CharacterSetOptions::default()
            .with_symbols("!!?")
            .active_classes()
            .unwrap();
        assert_eq!(active[3].table.len(), 3);
        assert_eq!(pool_size(&active), 26 + 26 + 10 + 2);
    }

    #[test]
    fn test_custom_symbols_reject_alphanumerics() {
        let result = CharacterSetOptions::default()
            .with_symbols("!a@")
            .active_classes();
        assert_eq!(
            result,
            Err(Error::InvalidInput(Violation::AlphanumericSymbol('a')))
        );
    }

    #[test]
    fn test_alphanumeric_symbols_ignored_when_disabled() {
        let options = CharacterSetOptions::default()
            .with_symbols("abc")
            .without(CharacterClass::Symbols);
        assert!(options.active_classes().is_ok());
    }

    #[test]
    fn test_non_ascii_symbols_accepted() {
        let active = CharacterSetOptions::default()
            .with_symbols("§€")
            .active_classes()
            .unwrap();
        assert!(active[3].contains('€'));
    }

    #[test]
    fn test_pick_formula() {
        let digits = ActiveClass {
            class: CharacterClass::Numbers,
            table: NUMBERS.iter().map(|&b| b as char).collect(),
        };
        assert_eq!(digits.pick(0, 0), '0');
        assert_eq!(digits.pick(1, 0), '1');
        assert_eq!(digits.pick(7, 1), '8');
        assert_eq!(digits.pick(15, 9), '4');
    }

    #[test]
    fn test_class_index_of() {
        let active = CharacterSetOptions::default().active_classes().unwrap();
        assert_eq!(class_index_of(&active, 'Q'), Some(0));
        assert_eq!(class_index_of(&active, 'q'), Some(1));
        assert_eq!(class_index_of(&active, '7'), Some(2));
        assert_eq!(class_index_of(&active, '%'), Some(3));
        assert_eq!(class_index_of(&active, ' '), None);
    }
}
