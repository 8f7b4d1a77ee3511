/// The KEY layout: keyboard rows separated by `|`, used to suggest
/// corrections for keys hit next to the intended one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardLayout {
    rows: Vec<Vec<char>>,
}

impl KeyboardLayout {
    pub fn new(layout: &str) -> Self {
        let rows = layout
            .split('|')
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().collect())
            .collect();
        KeyboardLayout { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Call `f` with the left and right neighbors of every occurrence of
    /// `c` in the layout. Keys at the end of a row have only one neighbor.
    pub fn neighbors(&self, c: char, mut f: impl FnMut(char) -> bool) {
        for row in self.rows.iter() {
            for (i, key) in row.iter().enumerate() {
                if *key != c {
                    continue;
                }
                if i > 0 && !f(row[i - 1]) {
                    return;
                }
                if i + 1 < row.len() && !f(row[i + 1]) {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn neighbors(kb: &KeyboardLayout, c: char) -> String {
        let mut s = String::new();
        kb.neighbors(c, |n| {
            s.push(n);
            true
        });
        s
    }

    #[test]
    fn test_neighbors() {
        let kb = KeyboardLayout::new("uiop|xdf|nm");
        assert_eq!("d", neighbors(&kb, 'f'));
        assert_eq!("d", neighbors(&kb, 'x'));
        assert_eq!("xf", neighbors(&kb, 'd'));
        assert_eq!("", neighbors(&kb, 'g'));
        assert_eq!("n", neighbors(&kb, 'm'));
    }

    #[test]
    fn test_repeated_keys() {
        let kb = KeyboardLayout::new("qwe|asd|zxc|ea");
        assert_eq!("wa", neighbors(&kb, 'e'));
        assert!(KeyboardLayout::new("||").is_empty());
    }
}
