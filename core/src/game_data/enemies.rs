use phf::phf_map;

use crate::ee_log::normalize_identifier;

static ENEMY_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    // Grineer
    "Ballista" => "弩炮",
    "Butcher" => "屠夫",
    "Commander" => "指挥官",
    "DargynPilot" => "达金飞行员",
    "EliteLancer" => "精英冲锋枪兵",
    "Flameblaster" => "火焰喷射兵",
    "HeavyGunner" => "重机枪兵",
    "HyekkaMaster" => "鬣猫驯兽师",
    "Lancer" => "冲锋枪兵",
    "ManicBombard" => "狂躁轰击者",
    "ManicCutter" => "狂躁切割者",
    "Napalm" => "燃烧弹兵",
    "Nullifier" => "驱魔者",
    "Razorback" => "剃背恐鸟",
    "Riot" => "暴徒",
    "Roller" => "滚子",
    "Scorpion" => "天蝎",
    "ShieldLancer" => "盾枪兵",
    "Sniper" => "狙击手",
    "Specter" => "幽鬼",
    "Stalker" => "追踪者",
    "TuskBallista" => "巨牙弩炮",
    "TuskButcher" => "巨牙屠夫",
    "TuskDargyn" => "巨牙达金",
    "TuskHeavyGunner" => "巨牙重机枪兵",
    "TuskLancer" => "巨牙冲锋枪兵",
    "TuskScorpion" => "巨牙天蝎",
    "TuskShieldLancer" => "巨牙盾枪兵",

    // Corpus
    "AntiMOA" => "反 MOA 机",
    "Bursa" => "金流恐鸟",
    "Comba" => "康巴",
    "CorpusTech" => "科珀斯技师",
    "Crawler" => "爬行者",
    "DenialBursa" => "拒止金流恐鸟",
    "Detron" => "德特昂枪兵",
    "EliteComba" => "精英康巴",
    "GoxHunter" => "戈克斯猎手",
    "Hyena" => "鬣狗",
    "MOA" => "MOA",
    "Osprey" => "鱼鹰",
    "OxiumHyena" => "氧化鬣狗",
    "Probe" => "探测器",
    "RailgunMOA" => "磁轨炮 MOA",
    "Scrambus" => "干扰恐鸟",
    "ShockwaveMOA" => "冲击波 MOA",
    "Supra" => "苏普拉枪兵",

    // Infested
    "Ancient" => "远古者",
    "Arachnoid" => "蛛形机",
    "Boiler" => "沸血者",
    "Charger" => "冲锋者",
    "CrawlerInfested" => "感染者爬行者",
    "DeimosBat" => "蝠鲼（夜灵平野）",
    "DenMother" => "育母",
    "Fungal" => "真菌者",
    "Ghoul" => "食尸鬼",
    "Juggernaut" => "主宰",
    "Leech" => "水蛭",
    "Mutalist" => "异融者",
    "Necramech" => "亡灵机甲",
    "Runner" => "奔跳者",
    "ScorpionInfested" => "感染者天蝎",
    "TarMorphid" => "焦油变形虫",
    "ToxicAncient" => "剧毒远古者",

    // Corrupted / Orokin
    "CorruptedButcher" => "堕落屠夫",
    "CorruptedCommander" => "堕落指挥官",
    "CorruptedHeavyGunner" => "堕落重机枪兵",
    "CorruptedLancer" => "堕落冲锋枪兵",
    "OrokinMoaBiped" => "Orokin MOA（双足）",
    "OrokinMoaQuad" => "Orokin MOA（四足）",

    // Special missions
    "VenusShockwaveBiped" => "金星冲击波双足机",
    "VenusShotgunSpaceman" => "金星霰弹枪兵",
    "ArachnoidCoolant" => "冷却蛛形机",

    // Generic fallbacks
    "Spaceman" => "步枪兵",
    "RifleSpaceman" => "步枪兵",
    "ShotgunSpaceman" => "霰弹枪兵",
    "PistolSpaceman" => "手枪兵",
    "Agent" => "未知单位",
};

/// Generic tails stripped one after another when the full type is unknown,
/// so `VenusShotgunSpacemanAgent` resolves as `VenusShotgunSpaceman`.
const TYPE_SUFFIXES: &[&str] = &["Agent", "Spaceman", "Biped", "Quad"];

pub fn enemy_display_name(raw: &str) -> String {
    let key = normalize_identifier(raw);
    if let Some(name) = ENEMY_NAMES.get(key) {
        return (*name).to_string();
    }

    let mut base = key;
    for suffix in TYPE_SUFFIXES {
        if let Some(stripped) = base.strip_suffix(suffix) {
            base = stripped;
            if let Some(name) = ENEMY_NAMES.get(base) {
                return (*name).to_string();
            }
        }
    }

    format!("未知敌人 ({raw})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_after_normalization() {
        assert_eq!(enemy_display_name("Lancer12"), "冲锋枪兵");
        assert_eq!(enemy_display_name("Lancer"), "冲锋枪兵");
    }

    #[test]
    fn test_suffix_stripping() {
        assert_eq!(enemy_display_name("ArachnoidCoolantAgent1"), "冷却蛛形机");
        assert_eq!(enemy_display_name("HeavyGunnerAgent7"), "重机枪兵");
    }

    #[test]
    fn test_suffixes_strip_cumulatively_in_order() {
        // Agent then Spaceman: ShotgunSpacemanAgent -> ShotgunSpaceman hits the table first
        assert_eq!(enemy_display_name("ShotgunSpacemanAgent3"), "霰弹枪兵");
        assert_eq!(enemy_display_name("MOAQuadAgent2"), "MOA");
        // Biped is checked before Quad, so it stays when it comes first
        assert_eq!(enemy_display_name("MOABipedQuad1"), "未知敌人 (MOABipedQuad1)");
    }

    #[test]
    fn test_unknown_enemy_keeps_raw_identifier() {
        assert_eq!(enemy_display_name("Zariman9"), "未知敌人 (Zariman9)");
    }
}
