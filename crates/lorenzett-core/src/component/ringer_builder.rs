//! Ring-sum builder step.

use crate::property::PropertyType;

const FLOAT_LIST: PropertyType = PropertyType::List(&PropertyType::Float);
const INT_LIST: PropertyType = PropertyType::List(&PropertyType::Int);

crate::declare_component! {
    /// Builds concentric ring sums around each cluster and fills ring
    /// profile histograms.
    pub struct CaloRingerBuilder: "CaloRingerBuilder";

    /// Properties accepted by [`CaloRingerBuilder`].
    pub enum RingerBuilderKey {
        RingerKey => PropertyType::String,
        ClusterKey => PropertyType::String,
        /// Ring width in eta, one entry per ring set.
        DeltaEtaRings => FLOAT_LIST,
        /// Ring width in phi, one entry per ring set.
        DeltaPhiRings => FLOAT_LIST,
        /// Number of rings in each ring set.
        NRings => INT_LIST,
        /// Calorimeter samplings summed into each ring set.
        LayerRings => PropertyType::List(&INT_LIST),
        OutputLevel => PropertyType::Level,
        HistogramPath => PropertyType::String,
    }
}
