use crate::SymbolTable;

impl SymbolTable {
    /// The symbol written for `count` hydroxyl groups, if one has been defined
    #[must_use]
    pub fn symbol(&self, count: u32) -> Option<&str> {
        self.symbols.get(&count).map(String::as_str)
    }

    /// The number of hydroxyl groups that `symbol` stands for, if it's in this table
    #[must_use]
    pub fn count(&self, symbol: &str) -> Option<u32> {
        self.counts.get(symbol).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    // NOTE: Callers must check for duplicate counts and symbols first, otherwise the two maps will drift apart
    pub(crate) fn insert(&mut self, count: u32, symbol: String) {
        self.counts.insert(symbol.clone(), count);
        self.symbols.insert(count, symbol);
    }
}
