use crate::element::ElementCategory::{
    Actinide as Ac, AlkaliMetal as Alk, AlkalineEarthMetal as AlkE, DiatomicNonmetal as DiN,
    Lanthanide as Ln, Metalloid as Mtd, NobleGas as Nbl, PolyatomicNonmetal as PoN,
    PostTransitionMetal as Ptm, TransitionMetal as Tm, Unknown as Unk,
};
use crate::element::{ElementCategory, ElementRecord};

pub const GRID_COLUMNS: u32 = 18;
pub const GRID_ROWS: u32 = 10;

struct Seed {
    symbol: &'static str,
    name: &'static str,
    name_ko: &'static str,
    mass: f64,
    category: ElementCategory,
    configuration: &'static str,
}

const fn seed(
    symbol: &'static str,
    name: &'static str,
    name_ko: &'static str,
    mass: f64,
    category: ElementCategory,
    configuration: &'static str,
) -> Seed {
    Seed {
        symbol,
        name,
        name_ko,
        mass,
        category,
        configuration,
    }
}

// Ordered by atomic number; index + 1 is the number.
const SEEDS: [Seed; 118] = [
    seed("H", "Hydrogen", "수소", 1.008, DiN, "1s1"),
    seed("He", "Helium", "헬륨", 4.0026, Nbl, "1s2"),
    seed("Li", "Lithium", "리튬", 6.94, Alk, "[He] 2s1"),
    seed("Be", "Beryllium", "베릴륨", 9.0122, AlkE, "[He] 2s2"),
    seed("B", "Boron", "붕소", 10.81, Mtd, "[He] 2s2 2p1"),
    seed("C", "Carbon", "탄소", 12.011, PoN, "[He] 2s2 2p2"),
    seed("N", "Nitrogen", "질소", 14.007, DiN, "[He] 2s2 2p3"),
    seed("O", "Oxygen", "산소", 15.999, DiN, "[He] 2s2 2p4"),
    seed("F", "Fluorine", "플루오린", 18.998, DiN, "[He] 2s2 2p5"),
    seed("Ne", "Neon", "네온", 20.180, Nbl, "[He] 2s2 2p6"),
    seed("Na", "Sodium", "나트륨", 22.990, Alk, "[Ne] 3s1"),
    seed("Mg", "Magnesium", "마그네슘", 24.305, AlkE, "[Ne] 3s2"),
    seed("Al", "Aluminium", "알루미늄", 26.982, Ptm, "[Ne] 3s2 3p1"),
    seed("Si", "Silicon", "규소", 28.085, Mtd, "[Ne] 3s2 3p2"),
    seed("P", "Phosphorus", "인", 30.974, PoN, "[Ne] 3s2 3p3"),
    seed("S", "Sulfur", "황", 32.06, PoN, "[Ne] 3s2 3p4"),
    seed("Cl", "Chlorine", "염소", 35.45, DiN, "[Ne] 3s2 3p5"),
    seed("Ar", "Argon", "아르곤", 39.948, Nbl, "[Ne] 3s2 3p6"),
    seed("K", "Potassium", "칼륨", 39.098, Alk, "[Ar] 4s1"),
    seed("Ca", "Calcium", "칼슘", 40.078, AlkE, "[Ar] 4s2"),
    seed("Sc", "Scandium", "스칸듐", 44.956, Tm, "[Ar] 3d1 4s2"),
    seed("Ti", "Titanium", "타이타늄", 47.867, Tm, "[Ar] 3d2 4s2"),
    seed("V", "Vanadium", "바나듐", 50.942, Tm, "[Ar] 3d3 4s2"),
    seed("Cr", "Chromium", "크로뮴", 51.996, Tm, "[Ar] 3d5 4s1"),
    seed("Mn", "Manganese", "망가니즈", 54.938, Tm, "[Ar] 3d5 4s2"),
    seed("Fe", "Iron", "철", 55.845, Tm, "[Ar] 3d6 4s2"),
    seed("Co", "Cobalt", "코발트", 58.933, Tm, "[Ar] 3d7 4s2"),
    seed("Ni", "Nickel", "니켈", 58.693, Tm, "[Ar] 3d8 4s2"),
    seed("Cu", "Copper", "구리", 63.546, Tm, "[Ar] 3d10 4s1"),
    seed("Zn", "Zinc", "아연", 65.38, Tm, "[Ar] 3d10 4s2"),
    seed("Ga", "Gallium", "갈륨", 69.723, Ptm, "[Ar] 3d10 4s2 4p1"),
    seed("Ge", "Germanium", "저마늄", 72.630, Mtd, "[Ar] 3d10 4s2 4p2"),
    seed("As", "Arsenic", "비소", 74.922, Mtd, "[Ar] 3d10 4s2 4p3"),
    seed("Se", "Selenium", "셀레늄", 78.971, PoN, "[Ar] 3d10 4s2 4p4"),
    seed("Br", "Bromine", "브로민", 79.904, DiN, "[Ar] 3d10 4s2 4p5"),
    seed("Kr", "Krypton", "크립톤", 83.798, Nbl, "[Ar] 3d10 4s2 4p6"),
    seed("Rb", "Rubidium", "루비듐", 85.468, Alk, "[Kr] 5s1"),
    seed("Sr", "Strontium", "스트론튬", 87.62, AlkE, "[Kr] 5s2"),
    seed("Y", "Yttrium", "이트륨", 88.906, Tm, "[Kr] 4d1 5s2"),
    seed("Zr", "Zirconium", "지르코늄", 91.224, Tm, "[Kr] 4d2 5s2"),
    seed("Nb", "Niobium", "나이오븀", 92.906, Tm, "[Kr] 4d4 5s1"),
    seed("Mo", "Molybdenum", "몰리브데넘", 95.95, Tm, "[Kr] 4d5 5s1"),
    seed("Tc", "Technetium", "테크네튬", 98.0, Tm, "[Kr] 4d5 5s2"),
    seed("Ru", "Ruthenium", "루테늄", 101.07, Tm, "[Kr] 4d7 5s1"),
    seed("Rh", "Rhodium", "로듐", 102.91, Tm, "[Kr] 4d8 5s1"),
    seed("Pd", "Palladium", "팔라듐", 106.42, Tm, "[Kr] 4d10"),
    seed("Ag", "Silver", "은", 107.87, Tm, "[Kr] 4d10 5s1"),
    seed("Cd", "Cadmium", "카드뮴", 112.41, Tm, "[Kr] 4d10 5s2"),
    seed("In", "Indium", "인듐", 114.82, Ptm, "[Kr] 4d10 5s2 5p1"),
    seed("Sn", "Tin", "주석", 118.71, Ptm, "[Kr] 4d10 5s2 5p2"),
    seed("Sb", "Antimony", "안티모니", 121.76, Mtd, "[Kr] 4d10 5s2 5p3"),
    seed("Te", "Tellurium", "텔루륨", 127.60, Mtd, "[Kr] 4d10 5s2 5p4"),
    seed("I", "Iodine", "아이오딘", 126.90, DiN, "[Kr] 4d10 5s2 5p5"),
    seed("Xe", "Xenon", "제논", 131.29, Nbl, "[Kr] 4d10 5s2 5p6"),
    seed("Cs", "Cesium", "세슘", 132.91, Alk, "[Xe] 6s1"),
    seed("Ba", "Barium", "바륨", 137.33, AlkE, "[Xe] 6s2"),
    seed("La", "Lanthanum", "란타넘", 138.91, Ln, "[Xe] 5d1 6s2"),
    seed("Ce", "Cerium", "세륨", 140.12, Ln, "[Xe] 4f1 5d1 6s2"),
    seed("Pr", "Praseodymium", "프라세오디뮴", 140.91, Ln, "[Xe] 4f3 6s2"),
    seed("Nd", "Neodymium", "네오디뮴", 144.24, Ln, "[Xe] 4f4 6s2"),
    seed("Pm", "Promethium", "프로메튬", 145.0, Ln, "[Xe] 4f5 6s2"),
    seed("Sm", "Samarium", "사마륨", 150.36, Ln, "[Xe] 4f6 6s2"),
    seed("Eu", "Europium", "유로퓸", 151.96, Ln, "[Xe] 4f7 6s2"),
    seed("Gd", "Gadolinium", "가돌리늄", 157.25, Ln, "[Xe] 4f7 5d1 6s2"),
    seed("Tb", "Terbium", "터븀", 158.93, Ln, "[Xe] 4f9 6s2"),
    seed("Dy", "Dysprosium", "디스프로슘", 162.50, Ln, "[Xe] 4f10 6s2"),
    seed("Ho", "Holmium", "홀뮴", 164.93, Ln, "[Xe] 4f11 6s2"),
    seed("Er", "Erbium", "어븀", 167.26, Ln, "[Xe] 4f12 6s2"),
    seed("Tm", "Thulium", "툴륨", 168.93, Ln, "[Xe] 4f13 6s2"),
    seed("Yb", "Ytterbium", "이터븀", 173.05, Ln, "[Xe] 4f14 6s2"),
    seed("Lu", "Lutetium", "루테튬", 174.97, Ln, "[Xe] 4f14 5d1 6s2"),
    seed("Hf", "Hafnium", "하프늄", 178.49, Tm, "[Xe] 4f14 5d2 6s2"),
    seed("Ta", "Tantalum", "탄탈럼", 180.95, Tm, "[Xe] 4f14 5d3 6s2"),
    seed("W", "Tungsten", "텅스텐", 183.84, Tm, "[Xe] 4f14 5d4 6s2"),
    seed("Re", "Rhenium", "레늄", 186.21, Tm, "[Xe] 4f14 5d5 6s2"),
    seed("Os", "Osmium", "오스뮴", 190.23, Tm, "[Xe] 4f14 5d6 6s2"),
    seed("Ir", "Iridium", "이리듐", 192.22, Tm, "[Xe] 4f14 5d7 6s2"),
    seed("Pt", "Platinum", "백금", 195.08, Tm, "[Xe] 4f14 5d9 6s1"),
    seed("Au", "Gold", "금", 196.97, Tm, "[Xe] 4f14 5d10 6s1"),
    seed("Hg", "Mercury", "수은", 200.59, Tm, "[Xe] 4f14 5d10 6s2"),
    seed("Tl", "Thallium", "탈륨", 204.38, Ptm, "[Xe] 4f14 5d10 6s2 6p1"),
    seed("Pb", "Lead", "납", 207.2, Ptm, "[Xe] 4f14 5d10 6s2 6p2"),
    seed("Bi", "Bismuth", "비스무트", 208.98, Ptm, "[Xe] 4f14 5d10 6s2 6p3"),
    seed("Po", "Polonium", "폴로늄", 209.0, Ptm, "[Xe] 4f14 5d10 6s2 6p4"),
    seed("At", "Astatine", "아스타틴", 210.0, Mtd, "[Xe] 4f14 5d10 6s2 6p5"),
    seed("Rn", "Radon", "라돈", 222.0, Nbl, "[Xe] 4f14 5d10 6s2 6p6"),
    seed("Fr", "Francium", "프랑슘", 223.0, Alk, "[Rn] 7s1"),
    seed("Ra", "Radium", "라듐", 226.0, AlkE, "[Rn] 7s2"),
    seed("Ac", "Actinium", "악티늄", 227.0, Ac, "[Rn] 6d1 7s2"),
    seed("Th", "Thorium", "토륨", 232.04, Ac, "[Rn] 6d2 7s2"),
    seed("Pa", "Protactinium", "프로트악티늄", 231.04, Ac, "[Rn] 5f2 6d1 7s2"),
    seed("U", "Uranium", "우라늄", 238.03, Ac, "[Rn] 5f3 6d1 7s2"),
    seed("Np", "Neptunium", "넵투늄", 237.0, Ac, "[Rn] 5f4 6d1 7s2"),
    seed("Pu", "Plutonium", "플루토늄", 244.0, Ac, "[Rn] 5f6 7s2"),
    seed("Am", "Americium", "아메리슘", 243.0, Ac, "[Rn] 5f7 7s2"),
    seed("Cm", "Curium", "퀴륨", 247.0, Ac, "[Rn] 5f7 6d1 7s2"),
    seed("Bk", "Berkelium", "버클륨", 247.0, Ac, "[Rn] 5f9 7s2"),
    seed("Cf", "Californium", "캘리포늄", 251.0, Ac, "[Rn] 5f10 7s2"),
    seed("Es", "Einsteinium", "아인슈타이늄", 252.0, Ac, "[Rn] 5f11 7s2"),
    seed("Fm", "Fermium", "페르뮴", 257.0, Ac, "[Rn] 5f12 7s2"),
    seed("Md", "Mendelevium", "멘델레븀", 258.0, Ac, "[Rn] 5f13 7s2"),
    seed("No", "Nobelium", "노벨륨", 259.0, Ac, "[Rn] 5f14 7s2"),
    seed("Lr", "Lawrencium", "로렌슘", 266.0, Ac, "[Rn] 5f14 7s2 7p1"),
    seed("Rf", "Rutherfordium", "러더포듐", 267.0, Tm, "[Rn] 5f14 6d2 7s2"),
    seed("Db", "Dubnium", "더브늄", 268.0, Tm, "[Rn] 5f14 6d3 7s2"),
    seed("Sg", "Seaborgium", "시보귬", 269.0, Tm, "[Rn] 5f14 6d4 7s2"),
    seed("Bh", "Bohrium", "보륨", 270.0, Tm, "[Rn] 5f14 6d5 7s2"),
    seed("Hs", "Hassium", "하슘", 277.0, Tm, "[Rn] 5f14 6d6 7s2"),
    seed("Mt", "Meitnerium", "마이트너륨", 278.0, Unk, "[Rn] 5f14 6d7 7s2"),
    seed("Ds", "Darmstadtium", "다름슈타튬", 281.0, Unk, "[Rn] 5f14 6d8 7s2"),
    seed("Rg", "Roentgenium", "뢴트게늄", 282.0, Unk, "[Rn] 5f14 6d9 7s2"),
    seed("Cn", "Copernicium", "코페르니슘", 285.0, Unk, "[Rn] 5f14 6d10 7s2"),
    seed("Nh", "Nihonium", "니호늄", 286.0, Unk, "[Rn] 5f14 6d10 7s2 7p1"),
    seed("Fl", "Flerovium", "플레로븀", 289.0, Unk, "[Rn] 5f14 6d10 7s2 7p2"),
    seed("Mc", "Moscovium", "모스코븀", 290.0, Unk, "[Rn] 5f14 6d10 7s2 7p3"),
    seed("Lv", "Livermorium", "리버모륨", 293.0, Unk, "[Rn] 5f14 6d10 7s2 7p4"),
    seed("Ts", "Tennessine", "테네신", 294.0, Unk, "[Rn] 5f14 6d10 7s2 7p5"),
    seed("Og", "Oganesson", "오가네손", 294.0, Unk, "[Rn] 5f14 6d10 7s2 7p6"),
];

/// Density (g/cm³), melting point and boiling point (K) for the first three periods.
const PHYSICAL: [(u32, f64, f64, f64); 18] = [
    (1, 0.08988, 14.01, 20.28),
    (2, 0.1786, 0.95, 4.22),
    (3, 0.534, 453.69, 1560.0),
    (4, 1.85, 1560.0, 2742.0),
    (5, 2.08, 2349.0, 4200.0),
    (6, 1.821, 3800.0, 4300.0),
    (7, 1.251, 63.15, 77.355),
    (8, 1.429, 54.36, 90.188),
    (9, 1.696, 53.53, 85.03),
    (10, 0.9002, 24.56, 27.07),
    (11, 0.968, 370.87, 1156.0),
    (12, 1.738, 923.0, 1363.0),
    (13, 2.7, 933.47, 2743.0),
    (14, 2.329, 1687.0, 3538.0),
    (15, 1.823, 317.3, 550.0),
    (16, 2.07, 388.36, 717.87),
    (17, 3.2, 171.6, 239.11),
    (18, 1.784, 83.81, 87.302),
];

/// Discoverer and short summaries (English, Korean) for the first three periods.
const NOTES: [(u32, &str, &str, &str); 18] = [
    (
        1,
        "Henry Cavendish",
        "The lightest element and the most abundant in the universe.",
        "가장 가볍고 우주에서 가장 풍부한 원소이다.",
    ),
    (
        2,
        "Pierre Janssen, Norman Lockyer",
        "A noble gas first seen in the solar spectrum.",
        "태양 스펙트럼에서 처음 발견된 비활성 기체이다.",
    ),
    (
        3,
        "Johan August Arfwedson",
        "The lightest metal, used in rechargeable batteries.",
        "가장 가벼운 금속으로 충전식 전지에 쓰인다.",
    ),
    (
        4,
        "Louis Nicolas Vauquelin",
        "A light, stiff metal found in beryl and emerald.",
        "녹주석과 에메랄드에 들어 있는 가볍고 단단한 금속이다.",
    ),
    (
        5,
        "Joseph Louis Gay-Lussac, Louis Jacques Thénard",
        "A metalloid used in borosilicate glass.",
        "붕규산 유리에 쓰이는 준금속이다.",
    ),
    (
        6,
        "",
        "The basis of organic chemistry, found as graphite and diamond.",
        "유기 화학의 기본 원소로 흑연과 다이아몬드로 존재한다.",
    ),
    (7, "Daniel Rutherford", "Makes up most of Earth's atmosphere.", "지구 대기의 대부분을 차지한다."),
    (8, "Carl Wilhelm Scheele", "A reactive gas essential for respiration.", "호흡에 꼭 필요한 반응성 기체이다."),
    (9, "Henri Moissan", "The most electronegative element.", "전기 음성도가 가장 큰 원소이다."),
    (
        10,
        "William Ramsay, Morris Travers",
        "A noble gas that glows orange-red in discharge tubes.",
        "방전관에서 주황빛으로 빛나는 비활성 기체이다.",
    ),
    (
        11,
        "Humphry Davy",
        "A soft alkali metal that reacts violently with water.",
        "물과 격렬하게 반응하는 무른 알칼리 금속이다.",
    ),
    (
        12,
        "Joseph Black",
        "A light metal that burns with a bright white flame.",
        "밝은 흰 불꽃을 내며 타는 가벼운 금속이다.",
    ),
    (13, "Hans Christian Ørsted", "The most abundant metal in Earth's crust.", "지각에 가장 많은 금속이다."),
    (
        14,
        "Jöns Jacob Berzelius",
        "A semiconductor at the heart of electronics.",
        "전자 산업의 핵심인 반도체 원소이다.",
    ),
    (
        15,
        "Hennig Brand",
        "Occurs as white and red allotropes and is vital for DNA.",
        "백린과 적린으로 존재하며 DNA에 꼭 필요하다.",
    ),
    (16, "", "A yellow nonmetal known since ancient times.", "고대부터 알려진 노란색 비금속이다."),
    (
        17,
        "Carl Wilhelm Scheele",
        "A toxic yellow-green gas used to disinfect water.",
        "물 소독에 쓰이는 유독한 황록색 기체이다.",
    ),
    (
        18,
        "Lord Rayleigh, William Ramsay",
        "The most common noble gas in the atmosphere.",
        "대기에 가장 많은 비활성 기체이다.",
    ),
];

const GASES: [u32; 11] = [1, 2, 7, 8, 9, 10, 17, 18, 36, 54, 86];
const LIQUIDS: [u32; 2] = [35, 80];

/// First atomic number of each period.
const PERIOD_STARTS: [u32; 7] = [1, 3, 11, 19, 37, 55, 87];

pub fn period_of(number: u32) -> u32 {
    PERIOD_STARTS
        .iter()
        .rposition(|start| number >= *start)
        .map(|index| index as u32 + 1)
        .unwrap_or(1)
}

/// Returns `(group, column, row)` in the 18-column layout.
///
/// The f-block rows report group 0 and sit on rows 9 and 10, columns 3..=17.
pub fn grid_position(number: u32) -> (u32, u32, u32) {
    let period = period_of(number);
    let offset = number - PERIOD_STARTS[(period - 1) as usize];

    let group = match period {
        1 => {
            if offset == 0 {
                1
            } else {
                18
            }
        }
        2 | 3 => {
            if offset < 2 {
                offset + 1
            } else {
                offset + 11
            }
        }
        4 | 5 => offset + 1,
        _ => {
            if offset < 2 {
                offset + 1
            } else if offset <= 16 {
                let row = if period == 6 { 9 } else { 10 };
                return (0, offset + 1, row);
            } else {
                offset - 13
            }
        }
    };

    (group, group, period)
}

fn phase_of(number: u32) -> &'static str {
    if GASES.contains(&number) {
        "Gas"
    } else if LIQUIDS.contains(&number) {
        "Liquid"
    } else {
        "Solid"
    }
}

/// The built-in table, ordered by atomic number.
pub fn builtin_elements() -> Vec<ElementRecord> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            let number = index as u32 + 1;
            let (group, xpos, ypos) = grid_position(number);
            let physical = PHYSICAL.iter().find(|(n, ..)| *n == number);
            let notes = NOTES.iter().find(|(n, ..)| *n == number);

            ElementRecord {
                number,
                symbol: seed.symbol.to_string(),
                name: seed.name.to_string(),
                name_ko: seed.name_ko.to_string(),
                category: seed.category,
                atomic_mass: Some(seed.mass),
                phase: phase_of(number).to_string(),
                density: physical.map(|(_, density, _, _)| *density),
                melt: physical.map(|(_, _, melt, _)| *melt),
                boil: physical.map(|(_, _, _, boil)| *boil),
                discovered_by: notes
                    .map(|(_, discoverer, _, _)| *discoverer)
                    .filter(|discoverer| !discoverer.is_empty())
                    .map(str::to_string),
                appearance: None,
                electron_configuration: seed.configuration.to_string(),
                period: period_of(number),
                group,
                xpos,
                ypos,
                source: format!("https://en.wikipedia.org/wiki/{}", seed.name),
                summary: notes.map(|(_, _, summary, _)| summary.to_string()).unwrap_or_default(),
                summary_ko: notes
                    .map(|(_, _, _, summary_ko)| summary_ko.to_string())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// Korean badge text for a category.
pub fn category_label(category: ElementCategory) -> &'static str {
    match category {
        ElementCategory::DiatomicNonmetal => "이원자 비금속",
        ElementCategory::NobleGas => "비활성 기체",
        ElementCategory::AlkaliMetal => "알칼리 금속",
        ElementCategory::AlkalineEarthMetal => "알칼리 토금속",
        ElementCategory::Metalloid => "준금속",
        ElementCategory::PolyatomicNonmetal => "다원자 비금속",
        ElementCategory::PostTransitionMetal => "전이후 금속",
        ElementCategory::TransitionMetal => "전이 금속",
        ElementCategory::Lanthanide => "란타넘족",
        ElementCategory::Actinide => "악티늄족",
        ElementCategory::Unknown => "알 수 없음",
    }
}
