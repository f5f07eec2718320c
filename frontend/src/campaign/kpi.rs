#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Goal {
    Awareness,
    Conversion,
    Traffic,
    Leads,
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::Awareness, Goal::Conversion, Goal::Traffic, Goal::Leads];

    pub fn key(self) -> &'static str {
        match self {
            Goal::Awareness => "awareness",
            Goal::Conversion => "conversion",
            Goal::Traffic => "traffic",
            Goal::Leads => "leads",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Goal::Awareness => "Brand Awareness",
            Goal::Conversion => "Conversions",
            Goal::Traffic => "Traffic",
            Goal::Leads => "Lead Generation",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.key() == key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Industry {
    Gaming,
    Finance,
    Crypto,
    RealEstate,
}

impl Industry {
    pub const ALL: [Industry; 4] = [Industry::Gaming, Industry::Finance, Industry::Crypto, Industry::RealEstate];

    pub fn key(self) -> &'static str {
        match self {
            Industry::Gaming => "gaming",
            Industry::Finance => "finance",
            Industry::Crypto => "crypto",
            Industry::RealEstate => "realestate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Industry::Gaming => "Gaming",
            Industry::Finance => "Finance",
            Industry::Crypto => "Crypto & Web3",
            Industry::RealEstate => "Real Estate",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.key() == key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kpis {
    pub roas: &'static str,
    pub ctr: &'static str,
    pub cpa: &'static str,
    pub conversion: &'static str,
}

const fn kpis(roas: &'static str, ctr: &'static str, cpa: &'static str, conversion: &'static str) -> Kpis {
    Kpis { roas, ctr, cpa, conversion }
}

pub fn kpis_for(goal: Goal, industry: Industry) -> Kpis {
    use Goal::*;
    use Industry::*;
    match (goal, industry) {
        (Awareness, Gaming) => kpis("1.8x", "2.4%", "$18", "3.2%"),
        (Awareness, Finance) => kpis("2.1x", "3.1%", "$42", "4.1%"),
        (Awareness, Crypto) => kpis("2.3x", "2.8%", "$28", "3.8%"),
        (Awareness, RealEstate) => kpis("1.9x", "2.2%", "$38", "2.9%"),
        (Conversion, Gaming) => kpis("2.4x", "3.2%", "$24", "4.7%"),
        (Conversion, Finance) => kpis("2.8x", "3.8%", "$52", "5.2%"),
        (Conversion, Crypto) => kpis("2.6x", "3.4%", "$34", "4.9%"),
        (Conversion, RealEstate) => kpis("2.2x", "2.8%", "$45", "3.8%"),
        (Traffic, Gaming) => kpis("1.6x", "4.2%", "$16", "2.8%"),
        (Traffic, Finance) => kpis("1.8x", "3.9%", "$28", "3.1%"),
        (Traffic, Crypto) => kpis("1.7x", "4.1%", "$22", "2.9%"),
        (Traffic, RealEstate) => kpis("1.5x", "3.6%", "$26", "2.5%"),
        (Leads, Gaming) => kpis("2.1x", "3.6%", "$28", "4.2%"),
        (Leads, Finance) => kpis("2.5x", "4.1%", "$48", "4.8%"),
        (Leads, Crypto) => kpis("2.3x", "3.8%", "$32", "4.4%"),
        (Leads, RealEstate) => kpis("2.0x", "3.2%", "$42", "3.6%"),
    }
}

/// Lookup by raw selector values; anything unknown shows conversion/gaming.
pub fn kpis_for_keys(goal: &str, industry: &str) -> Kpis {
    match (Goal::from_key(goal), Industry::from_key(industry)) {
        (Some(goal), Some(industry)) => kpis_for(goal, industry),
        _ => kpis_for(Goal::Conversion, Industry::Gaming),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pair() {
        let k = kpis_for_keys("leads", "finance");
        assert_eq!(k, kpis("2.5x", "4.1%", "$48", "4.8%"));
    }

    #[test]
    fn unknown_pair_falls_back() {
        let fallback = kpis_for(Goal::Conversion, Industry::Gaming);
        assert_eq!(kpis_for_keys("retention", "gaming"), fallback);
        assert_eq!(kpis_for_keys("awareness", "automotive"), fallback);
        assert_eq!(kpis_for_keys("", ""), fallback);
    }

    #[test]
    fn keys_round_trip() {
        for goal in Goal::ALL {
            assert_eq!(Goal::from_key(goal.key()), Some(goal));
        }
        for industry in Industry::ALL {
            assert_eq!(Industry::from_key(industry.key()), Some(industry));
        }
    }
}
