use crate::models::activity::{ActivityValue, RawActivity};

/// 累加器中的一条记录：每个唯一分子只保留第一次出现的活性数据
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeRecord {
    pub molecule_chembl_id: String,
    pub target: Option<String>,
    pub activity_type: Option<String>,
    pub activity_value: ActivityValue,
    pub activity_units: Option<String>,
    pub assay_description: Option<String>,
}

impl MoleculeRecord {
    /// 从原始记录派生；分子 ID 或活性值缺失时返回 `None`
    ///
    /// 活性值是否"缺失"由调用方按策略判断，这里只要求字段存在。
    pub fn from_activity(activity: &RawActivity) -> Option<Self> {
        Some(Self {
            molecule_chembl_id: activity.molecule_id()?.to_string(),
            target: activity.target_chembl_id.clone(),
            activity_type: activity.standard_type.clone(),
            activity_value: activity.value.clone()?,
            activity_units: activity.units.clone(),
            assay_description: activity.assay_description.clone(),
        })
    }

    /// 按列顺序输出单元格文本，空值输出为空字符串
    pub fn cells(&self) -> [String; 6] {
        [
            self.molecule_chembl_id.clone(),
            self.target.clone().unwrap_or_default(),
            self.activity_type.clone().unwrap_or_default(),
            self.activity_value.to_string(),
            self.activity_units.clone().unwrap_or_default(),
            self.assay_description.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_activity_maps_columns() {
        let activity = RawActivity {
            molecule_chembl_id: Some("CHEMBL68920".to_string()),
            target_chembl_id: Some("CHEMBL203".to_string()),
            standard_type: Some("IC50".to_string()),
            value: Some(ActivityValue::Text("41.0".to_string())),
            units: Some("nM".to_string()),
            assay_description: None,
        };

        let record = MoleculeRecord::from_activity(&activity).unwrap();
        assert_eq!(record.molecule_chembl_id, "CHEMBL68920");
        assert_eq!(record.target.as_deref(), Some("CHEMBL203"));
        assert_eq!(
            record.cells(),
            ["CHEMBL68920", "CHEMBL203", "IC50", "41.0", "nM", ""].map(String::from)
        );
    }

    #[test]
    fn test_from_activity_requires_id_and_value() {
        let no_value = RawActivity {
            molecule_chembl_id: Some("CHEMBL1".to_string()),
            ..RawActivity::default()
        };
        assert!(MoleculeRecord::from_activity(&no_value).is_none());

        let no_id = RawActivity {
            value: Some(ActivityValue::Number(1.0)),
            ..RawActivity::default()
        };
        assert!(MoleculeRecord::from_activity(&no_id).is_none());
    }
}
