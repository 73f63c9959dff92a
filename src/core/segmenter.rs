//! Splits the free-form text of one meal cell into menu items.
//!
//! Cells either carry one dish per line, or a single run-on string such as
//! `잡곡밥된장찌개제육볶음`. The run-on case is cut after every food-category
//! keyword (`밥`, `찌개`, `볶음`, ...), trying longer keywords first at each
//! position so that `볶음밥` is not split into `볶음` + `밥`. This is a best-effort
//! heuristic: dish names that merely contain a keyword get over-split, names
//! without one stay glued to their neighbour.

use crate::domain::model::{truncate_chars, MenuItem, MAX_ITEM_NAME_CHARS};
use std::collections::HashSet;

/// 順序僅影響同長度關鍵字
const DEFAULT_KEYWORDS: &[&str] = &[
    // 飯類
    "볶음밥", "비빔밥", "주먹밥", "오므라이스", "덮밥", "김밥", "국밥", "밥",
    // 麵類
    "짜장면", "스파게티", "파스타", "국수", "우동", "라면", "짬뽕", "냉면",
    // 湯 / 鍋
    "탕수육", "찌개", "전골", "스프", "수프", "국", "탕",
    // 小菜
    "볶음", "조림", "무침", "구이", "튀김", "나물", "말이", "샐러드", "찜", "전",
    "배추김치", "열무김치", "총각김치", "깍두기",
    // 炸物與其他
    "돈까스", "커틀릿", "까스", "카레", "요구르트", "주스",
];

/// Ordered keyword vocabulary, longest keywords first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    keywords: Vec<String>,
}

impl KeywordTable {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self {
            keywords: Vec::new(),
        };
        table.extend(keywords);
        table
    }

    /// Adds keywords, ignoring blanks and duplicates, and restores
    /// longest-first order.
    pub fn extend<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for keyword in keywords {
            let keyword = keyword.into().trim().to_string();
            if !keyword.is_empty() && !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }
        // stable sort 保留同長度的原始順序
        self.keywords
            .sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Byte length of the longest keyword that `text` starts with.
    fn longest_match_at(&self, text: &str) -> Option<usize> {
        self.keywords
            .iter()
            .find(|keyword| text.starts_with(keyword.as_str()))
            .map(String::len)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

/// Segments one cell's text into items. Empty or blank text yields no items;
/// any other text yields at least one.
pub fn segment(text: &str, table: &KeywordTable) -> Vec<MenuItem> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let names: Vec<&str> = if trimmed.contains(['\n', '\r']) {
        trimmed
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|line| line.chars().count() > 1)
            .collect()
    } else {
        split_on_keywords(trimmed, table)
    };

    if names.is_empty() {
        tracing::debug!("No segment survived for '{}', keeping raw text", trimmed);
        return MenuItem::new(&truncate_chars(trimmed, MAX_ITEM_NAME_CHARS))
            .into_iter()
            .collect();
    }

    names.into_iter().filter_map(MenuItem::new).collect()
}

fn split_on_keywords<'a>(text: &'a str, table: &KeywordTable) -> Vec<&'a str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut cursor = 0;

    while let Some(next_char) = text[cursor..].chars().next() {
        match table.longest_match_at(&text[cursor..]) {
            Some(len) => {
                cursor += len;
                fragments.push(&text[start..cursor]);
                start = cursor;
            }
            None => cursor += next_char.len_utf8(),
        }
    }
    if start < text.len() {
        fragments.push(&text[start..]);
    }

    fragments
        .into_iter()
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() > 1)
        .collect()
}

/// Drops repeated items, comparing names with whitespace removed and keeping
/// the first occurrence.
pub fn dedup_items(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let key: String = item.name().chars().filter(|c| !c.is_whitespace()).collect();
            seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(MenuItem::name).collect()
    }

    #[test]
    fn test_segment_run_on_text() {
        let table = KeywordTable::new(["밥", "찌개", "볶음"]);
        let items = segment("잡곡밥된장찌개제육볶음", &table);

        assert_eq!(names(&items), vec!["잡곡밥", "된장찌개", "제육볶음"]);
        assert!(items.iter().all(|i| i.price().is_none() && i.calories().is_none()));
    }

    #[test]
    fn test_segment_default_table_full_day() {
        let items = segment("잡곡밥순두부찌개돈까스스프배추김치", &KeywordTable::default());
        assert_eq!(
            names(&items),
            vec!["잡곡밥", "순두부찌개", "돈까스", "스프", "배추김치"]
        );
    }

    #[test]
    fn test_segment_prefers_longer_keyword() {
        let items = segment("김치볶음밥계란국", &KeywordTable::default());
        assert_eq!(names(&items), vec!["김치볶음밥", "계란국"]);

        let items = segment("잔치국수탕수육", &KeywordTable::default());
        assert_eq!(names(&items), vec!["잔치국수", "탕수육"]);
    }

    #[test]
    fn test_segment_line_breaks() {
        let items = segment("잡곡밥\n 된장찌개 \r\n\n김\n제육볶음", &KeywordTable::default());
        // 單字行被略過
        assert_eq!(names(&items), vec!["잡곡밥", "된장찌개", "제육볶음"]);
    }

    #[test]
    fn test_segment_spaces_between_dishes() {
        let items = segment("쌀밥 김치찌개 계란말이", &KeywordTable::default());
        assert_eq!(names(&items), vec!["쌀밥", "김치찌개", "계란말이"]);
    }

    #[test]
    fn test_segment_empty_input() {
        assert!(segment("", &KeywordTable::default()).is_empty());
        assert!(segment("  \n\t ", &KeywordTable::default()).is_empty());
    }

    #[test]
    fn test_segment_falls_back_to_raw_text() {
        let items = segment("밥", &KeywordTable::default());
        assert_eq!(names(&items), vec!["밥"]);

        let items = segment("밥밥", &KeywordTable::default());
        assert_eq!(names(&items), vec!["밥밥"]);

        let long = "가".repeat(70);
        let items = segment(&long, &KeywordTable::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name().chars().count(), MAX_ITEM_NAME_CHARS);
    }

    #[test]
    fn test_segment_never_drops_non_empty_text() {
        let table = KeywordTable::default();
        let inputs = [
            "A",
            "운영없음",
            "밥 국",
            "휴무\n-",
            "※ 원산지 표시",
            "샐러드샐러드",
            "x\ny",
        ];
        for input in inputs {
            assert!(!segment(input, &table).is_empty(), "input {:?} produced no items", input);
        }
    }

    #[test]
    fn test_segment_under_splits_without_keyword() {
        let items = segment("닭갈비샐러드", &KeywordTable::default());
        assert_eq!(names(&items), vec!["닭갈비샐러드"]);
    }

    #[test]
    fn test_keyword_table_orders_longest_first() {
        let mut table = KeywordTable::new(["밥", "볶음", "볶음밥"]);
        assert_eq!(table.keywords()[0], "볶음밥");

        table.extend(["  ", "밥", "비빔밥"]);
        assert_eq!(table.keywords().len(), 4);
        assert_eq!(table.keywords().last().unwrap(), "밥");
    }

    #[test]
    fn test_dedup_items_ignores_whitespace() {
        let items = vec![
            MenuItem::new("배추 김치").unwrap(),
            MenuItem::new("잡곡밥").unwrap(),
            MenuItem::new("배추김치").unwrap(),
        ];
        assert_eq!(names(&dedup_items(items)), vec!["배추 김치", "잡곡밥"]);
    }
}
