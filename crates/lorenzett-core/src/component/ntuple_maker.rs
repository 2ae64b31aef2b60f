//! Cluster-to-ntuple conversion step.

use crate::property::PropertyType;

crate::declare_component! {
    /// Writes reconstructed and truth clusters, with their rings, into an
    /// ntuple. Truth and reconstructed clusters are matched within `DeltaR`.
    pub struct CaloNtupleMaker: "CaloNtupleMaker";

    /// Properties accepted by [`CaloNtupleMaker`].
    pub enum NtupleMakerKey {
        EventKey => PropertyType::String,
        ClusterKey => PropertyType::String,
        TruthClusterKey => PropertyType::String,
        CaloKey => PropertyType::String,
        RingerKey => PropertyType::String,
        TruthRingerKey => PropertyType::String,
        OutputLevel => PropertyType::Level,
        /// Matching cone between truth and reconstructed clusters.
        DeltaR => PropertyType::Float,
        /// Also write the cells of every cluster.
        DumpCells => PropertyType::Bool,
        NtupleName => PropertyType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentKind, PropertyKey};

    #[test]
    fn test_allow_list() {
        let names: Vec<_> = NtupleMakerKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "EventKey",
                "ClusterKey",
                "TruthClusterKey",
                "CaloKey",
                "RingerKey",
                "TruthRingerKey",
                "OutputLevel",
                "DeltaR",
                "DumpCells",
                "NtupleName",
            ]
        );
        assert_eq!(CaloNtupleMaker::CLASS_NAME, "CaloNtupleMaker");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(NtupleMakerKey::parse("DeltaR"), Some(NtupleMakerKey::DeltaR));
        assert_eq!(NtupleMakerKey::parse("deltar"), None);
        assert_eq!(NtupleMakerKey::parse("HistogramPath"), None);
    }

    #[test]
    fn test_declared_types() {
        assert_eq!(NtupleMakerKey::DeltaR.property_type(), PropertyType::Float);
        assert_eq!(NtupleMakerKey::OutputLevel.property_type(), PropertyType::Level);
        assert_eq!(NtupleMakerKey::CaloKey.to_string(), "CaloKey");
    }
}
