//! 去重累加器 - 业务能力层
//!
//! 按分子 ID 去重，先到先得，保留发现顺序

use crate::models::MoleculeRecord;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// 单条记录尝试写入的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// 新分子，已写入
    Inserted,
    /// 分子已存在，保留旧记录
    Duplicate,
    /// 已达到容量上限，未写入
    Full,
}

/// 去重累加器
///
/// 不变量：
/// - 同一个分子 ID 最多出现一次，写入后不会被覆盖
/// - 记录数不超过 `capacity`
#[derive(Debug, Clone)]
pub struct Accumulator {
    records: IndexMap<String, MoleculeRecord>,
    capacity: usize,
}

impl Accumulator {
    /// 创建容量为 `capacity` 的累加器
    ///
    /// `capacity` 只是上限，存储按实际写入量增长。
    pub fn new(capacity: usize) -> Self {
        Self {
            records: IndexMap::new(),
            capacity,
        }
    }

    /// 写入一条记录（已存在的分子不会被覆盖）
    pub fn insert(&mut self, record: MoleculeRecord) -> InsertOutcome {
        if self.is_full() {
            return InsertOutcome::Full;
        }
        match self.records.entry(record.molecule_chembl_id.clone()) {
            Entry::Occupied(_) => InsertOutcome::Duplicate,
            Entry::Vacant(slot) => {
                slot.insert(record);
                InsertOutcome::Inserted
            }
        }
    }

    pub fn contains(&self, molecule_chembl_id: &str) -> bool {
        self.records.contains_key(molecule_chembl_id)
    }

    pub fn get(&self, molecule_chembl_id: &str) -> Option<&MoleculeRecord> {
        self.records.get(molecule_chembl_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 是否已收集到目标数量
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// 按发现顺序返回的分子 ID
    pub fn molecule_ids(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    pub fn into_records(self) -> Vec<MoleculeRecord> {
        self.records.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityValue;

    fn record(id: &str, value: &str) -> MoleculeRecord {
        MoleculeRecord {
            molecule_chembl_id: id.to_string(),
            target: Some("CHEMBL203".to_string()),
            activity_type: Some("IC50".to_string()),
            activity_value: ActivityValue::Text(value.to_string()),
            activity_units: Some("nM".to_string()),
            assay_description: None,
        }
    }

    #[test]
    fn test_first_seen_wins() {
        let mut acc = Accumulator::new(10);
        assert_eq!(acc.insert(record("CHEMBL1", "1.0")), InsertOutcome::Inserted);
        assert_eq!(acc.insert(record("CHEMBL1", "9.9")), InsertOutcome::Duplicate);

        assert_eq!(acc.len(), 1);
        assert_eq!(
            acc.get("CHEMBL1").unwrap().activity_value,
            ActivityValue::Text("1.0".to_string())
        );
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let mut acc = Accumulator::new(2);
        acc.insert(record("CHEMBL1", "1"));
        acc.insert(record("CHEMBL2", "2"));
        assert!(acc.is_full());
        assert_eq!(acc.insert(record("CHEMBL3", "3")), InsertOutcome::Full);
        assert_eq!(acc.len(), 2);
        assert!(!acc.contains("CHEMBL3"));
    }

    #[test]
    fn test_huge_capacity_does_not_reserve_up_front() {
        let mut acc = Accumulator::new(usize::MAX / 64);
        assert!(acc.is_empty());
        assert!(!acc.is_full());
        assert_eq!(acc.insert(record("CHEMBL1", "1")), InsertOutcome::Inserted);
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn test_iteration_keeps_discovery_order() {
        let mut acc = Accumulator::new(5);
        for id in ["CHEMBL9", "CHEMBL2", "CHEMBL5", "CHEMBL2"] {
            acc.insert(record(id, "1"));
        }
        assert_eq!(acc.molecule_ids(), vec!["CHEMBL9", "CHEMBL2", "CHEMBL5"]);

        let ids: Vec<String> = acc
            .into_records()
            .into_iter()
            .map(|r| r.molecule_chembl_id)
            .collect();
        assert_eq!(ids, vec!["CHEMBL9", "CHEMBL2", "CHEMBL5"]);
    }
}
