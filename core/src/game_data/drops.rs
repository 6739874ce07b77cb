use phf::phf_map;

static DROP_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    // Mods
    "DefaultModPickup" => "随机 Mod",

    // Orbs
    "EnergyIncreaseSmall" => "小型能量球",
    "EnergyIncreaseMedium" => "中型能量球",
    "HealthIncreaseSmall" => "小型生命球",
    "HealthIncreaseMedium" => "中型生命球",

    // Resources
    "AlloyPlate" => "合金板",
    "Ferrite" => "铁氧体",
    "NanoSpores" => "纳米孢子",
    "PolymerBundle" => "聚合物捆",
    "Salvage" => "打捞物",
    "OrokinCell" => "Orokin 电池",
    "Fieldron" => "菲德隆",
    "DetoniteInjector" => "爆破注射器",
    "MutagenSample" => "突变原样本",
    "NeuralSensors" => "神经传感器",
    "ArgonCrystal" => "氩结晶",

    "CreditsPickup" => "现金",

    // Sculptures
    "AyatanSculptureAnasa" => "阿那萨雕像",
    "AyatanSculptureHuras" => "胡拉斯雕像",
    "AyatanSculptureSantamu" => "桑塔穆雕像",
};

/// Substring fallbacks for keys missing from the table, checked in order.
const DROP_CATEGORIES: &[(&str, &str)] = &[
    ("AyatanSculpture", "Ayatan 雕像"),
    ("ModPickup", "Mod"),
    ("EnergyIncrease", "能量球"),
    ("HealthIncrease", "生命球"),
    ("Credits", "现金"),
];

const RESOURCE_MARKERS: &[&str] = &[
    "Alloy", "Ferrite", "Nano", "Polymer", "Salvage", "Orokin", "Fieldron", "Detonite", "Mutagen",
    "Neural", "Argon",
];

pub fn drop_display_name(key: &str) -> String {
    if let Some(name) = DROP_NAMES.get(key) {
        return (*name).to_string();
    }
    if let Some((_, name)) = DROP_CATEGORIES.iter().find(|(marker, _)| key.contains(marker)) {
        return (*name).to_string();
    }
    if RESOURCE_MARKERS.iter().any(|marker| key.contains(marker)) {
        return "资源".to_string();
    }
    format!("未知物品 ({key})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(drop_display_name("EnergyIncreaseSmall"), "小型能量球");
        assert_eq!(drop_display_name("OrokinCell"), "Orokin 电池");
    }

    #[test]
    fn test_category_fallbacks() {
        assert_eq!(drop_display_name("AyatanSculptureValana"), "Ayatan 雕像");
        assert_eq!(drop_display_name("RareModPickup"), "Mod");
        assert_eq!(drop_display_name("EnergyIncreaseLarge"), "能量球");
        assert_eq!(drop_display_name("HealthIncreaseLarge"), "生命球");
        assert_eq!(drop_display_name("CreditsPickupLarge"), "现金");
        assert_eq!(drop_display_name("FerriteBundle"), "资源");
        assert_eq!(drop_display_name("ArgonShard"), "资源");
    }

    #[test]
    fn test_unknown_drop() {
        assert_eq!(drop_display_name("Kuva"), "未知物品 (Kuva)");
    }
}
