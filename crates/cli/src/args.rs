use clap::Args;
use variantize_sim::simulation::MutationConfig;

/// Per-operator trigger probability overrides.
///
/// Each flag replaces the rate from the configuration file (or the built-in
/// default) for one operator; the size distributions are left unchanged.
#[derive(Args, Debug, Clone, Default)]
pub struct RateOverrides {
    /// Substitution probability per base (default 0.001)
    #[arg(long)]
    pub snp_rate: Option<f64>,

    /// Small indel probability per base (default 0.0001)
    #[arg(long)]
    pub small_indel_rate: Option<f64>,

    /// Large indel probability per base (default 0.0001)
    #[arg(long)]
    pub large_indel_rate: Option<f64>,

    /// Inversion probability per base (default 0.0001)
    #[arg(long)]
    pub inversion_rate: Option<f64>,

    /// Tandem duplication probability per base (default 0.0001)
    #[arg(long)]
    pub tandem_dup_rate: Option<f64>,

    /// Dispersed duplication events per base (default 0.00001)
    #[arg(long)]
    pub dispersed_dup_rate: Option<f64>,

    /// Non-reciprocal translocation events per base (default 0.00001)
    #[arg(long)]
    pub nr_trans_rate: Option<f64>,

    /// Reciprocal translocation events per base (default 0.00001)
    #[arg(long)]
    pub r_trans_rate: Option<f64>,
}

impl RateOverrides {
    /// Write every given rate into `config`.
    pub fn apply(&self, config: &mut MutationConfig) {
        if let Some(rate) = self.snp_rate {
            config.substitution.rate = rate;
        }
        if let Some(rate) = self.small_indel_rate {
            config.small_indel.rate = rate;
        }
        if let Some(rate) = self.large_indel_rate {
            config.large_indel.rate = rate;
        }
        if let Some(rate) = self.inversion_rate {
            config.inversion.rate = rate;
        }
        if let Some(rate) = self.tandem_dup_rate {
            config.tandem_duplication.rate = rate;
        }
        if let Some(rate) = self.dispersed_dup_rate {
            config.dispersed_duplication.rate = rate;
        }
        if let Some(rate) = self.nr_trans_rate {
            config.nr_translocation.rate = rate;
        }
        if let Some(rate) = self.r_trans_rate {
            config.r_translocation.rate = rate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_only_touch_given_rates() {
        let overrides = RateOverrides {
            snp_rate: Some(0.5),
            r_trans_rate: Some(0.0),
            ..Default::default()
        };
        let mut config = MutationConfig::default();
        overrides.apply(&mut config);

        let defaults = MutationConfig::default();
        assert_eq!(config.substitution.rate, 0.5);
        assert_eq!(config.r_translocation.rate, 0.0);
        assert_eq!(config.r_translocation.scale, defaults.r_translocation.scale);
        assert_eq!(config.inversion, defaults.inversion);
    }
}
