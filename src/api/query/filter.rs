use std::collections::BTreeSet;
use std::fmt;

/// Which ledger indices a run should touch. Bounds are exclusive and `0`
/// leaves a bound unset, which is safe because indices start at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub equals: BTreeSet<usize>,
    pub greater_than: usize,
    pub less_than: usize,
}

impl SelectionCriteria {
    pub fn new(
        equals: impl IntoIterator<Item = usize>,
        greater_than: usize,
        less_than: usize,
    ) -> SelectionCriteria {
        SelectionCriteria {
            equals: equals.into_iter().collect(),
            greater_than,
            less_than,
        }
    }

    pub fn matches(&self, index: usize) -> bool {
        is_included(index, &self.equals, self.greater_than, self.less_than)
    }
}

/// Range condition AND equality condition. An empty `equals` set and zero
/// bounds match every index.
pub fn is_included(
    index: usize,
    equals: &BTreeSet<usize>,
    greater_than: usize,
    less_than: usize,
) -> bool {
    let in_range = match (greater_than, less_than) {
        (0, 0) => true,
        (greater_than, 0) => index > greater_than,
        (0, less_than) => index < less_than,
        (greater_than, less_than) => greater_than < index && index < less_than,
    };
    let in_set = equals.is_empty() || equals.contains(&index);

    in_range && in_set
}

impl fmt::Display for SelectionCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.equals.is_empty() {
            let ids: Vec<String> = self.equals.iter().map(ToString::to_string).collect();
            parts.push(format!("id in [{}]", ids.join(", ")));
        }
        if self.greater_than != 0 {
            parts.push(format!("id > {}", self.greater_than));
        }
        if self.less_than != 0 {
            parts.push(format!("id < {}", self.less_than));
        }

        if parts.is_empty() {
            write!(f, "all wallets")
        } else {
            write!(f, "{}", parts.join(" and "))
        }
    }
}
