//! Built-in tag catalogue: `(code, short description, long description)`.
//!
//! Long descriptions are the entity values JMdict declares in its DTD; the
//! parser sees them after entity expansion and maps them back to codes.

pub(super) const BUILTIN: &[(&str, &str, &str)] = &[
    // dialects
    ("bra", "Brazilian", "Brazilian"),
    ("hob", "Hokkaido", "Hokkaido-ben"),
    ("ksb", "Kansai", "Kansai-ben"),
    ("ktb", "Kantou", "Kantou-ben"),
    ("kyb", "Kyoto", "Kyoto-ben"),
    ("kyu", "Kyuushuu", "Kyuushuu-ben"),
    ("nab", "Nagano", "Nagano-ben"),
    ("osb", "Osaka", "Osaka-ben"),
    ("rkb", "Ryuukyuu", "Ryuukyuu-ben"),
    ("thb", "Touhoku", "Touhoku-ben"),
    ("tsb", "Tosa", "Tosa-ben"),
    ("tsug", "Tsugaru", "Tsugaru-ben"),
    // fields
    ("agric", "agriculture", "agriculture"),
    ("anat", "anatomy", "anatomy"),
    ("archeol", "archeology", "archeology"),
    ("archit", "architecture", "architecture"),
    ("art", "art", "art, aesthetics"),
    ("astron", "astronomy", "astronomy"),
    ("audvid", "audiovisual", "audiovisual"),
    ("aviat", "aviation", "aviation"),
    ("baseb", "baseball", "baseball"),
    ("biochem", "biochemistry", "biochemistry"),
    ("biol", "biology", "biology"),
    ("bot", "botany", "botany"),
    ("Buddh", "Buddhism", "Buddhism"),
    ("bus", "business", "business"),
    ("chem", "chemistry", "chemistry"),
    ("Christn", "Christianity", "Christianity"),
    ("cloth", "clothing", "clothing"),
    ("comp", "computing", "computing"),
    ("cryst", "crystallography", "crystallography"),
    ("ecol", "ecology", "ecology"),
    ("econ", "economics", "economics"),
    ("elec", "electricity", "electricity, elec. eng."),
    ("electr", "electronics", "electronics"),
    ("embryo", "embryology", "embryology"),
    ("engr", "engineering", "engineering"),
    ("ent", "entomology", "entomology"),
    ("finc", "finance", "finance"),
    ("fish", "fishing", "fishing"),
    ("food", "food", "food, cooking"),
    ("gardn", "gardening", "gardening, horticulture"),
    ("genet", "genetics", "genetics"),
    ("geogr", "geography", "geography"),
    ("geol", "geology", "geology"),
    ("geom", "geometry", "geometry"),
    ("go", "go", "go (game)"),
    ("golf", "golf", "golf"),
    ("gramm", "grammar", "grammar"),
    ("grmyth", "Greek myth", "Greek mythology"),
    ("hanaf", "hanafuda", "hanafuda"),
    ("horse", "horse racing", "horse racing"),
    ("law", "law", "law"),
    ("ling", "linguistics", "linguistics"),
    ("logic", "logic", "logic"),
    ("MA", "martial arts", "martial arts"),
    ("mahj", "mahjong", "mahjong"),
    ("math", "mathematics", "mathematics"),
    ("mech", "mech. engineering", "mechanical engineering"),
    ("med", "medicine", "medicine"),
    ("met", "meteorology", "meteorology"),
    ("mil", "military", "military"),
    ("music", "music", "music"),
    ("ornith", "ornithology", "ornithology"),
    ("paleo", "paleontology", "paleontology"),
    ("pathol", "pathology", "pathology"),
    ("pharm", "pharmacy", "pharmacy"),
    ("phil", "philosophy", "philosophy"),
    ("photo", "photography", "photography"),
    ("physics", "physics", "physics"),
    ("physiol", "physiology", "physiology"),
    ("print", "printing", "printing"),
    ("psy", "psychiatry", "psychiatry"),
    ("psych", "psychology", "psychology"),
    ("rail", "railway", "railway"),
    ("Shinto", "Shinto", "Shinto"),
    ("shogi", "shogi", "shogi"),
    ("sports", "sports", "sports"),
    ("stat", "statistics", "statistics"),
    ("sumo", "sumo", "sumo"),
    ("telec", "telecom", "telecommunications"),
    ("tradem", "trademark", "trademark"),
    ("vidg", "video games", "video games"),
    ("zool", "zoology", "zoology"),
    // kanji and reading information
    ("ateji", "ateji", "ateji (phonetic) reading"),
    ("gikun", "gikun", "gikun (meaning as reading) or jukujikun (special kanji reading)"),
    ("ik", "irregular kana", "word containing irregular kana usage"),
    ("iK", "irregular kanji", "word containing irregular kanji usage"),
    ("io", "irregular okurigana", "irregular okurigana usage"),
    ("oK", "outdated kanji", "word containing out-dated kanji or kanji usage"),
    ("ok", "outdated kana", "out-dated or obsolete kana usage"),
    ("rK", "rare kanji", "rarely used kanji form"),
    ("rk", "rare kana", "rarely used kana form"),
    ("sK", "search-only kanji", "search-only kanji form"),
    ("sk", "search-only kana", "search-only kana form"),
    ("uK", "usually kanji", "word usually written using kanji alone"),
    // miscellaneous
    ("abbr", "abbreviation", "abbreviation"),
    ("arch", "archaism", "archaic"),
    ("char", "character", "character"),
    ("chn", "children's", "children's language"),
    ("col", "colloquial", "colloquial"),
    ("company", "company", "company name"),
    ("creat", "creature", "creature"),
    ("dated", "dated", "dated term"),
    ("dei", "deity", "deity"),
    ("derog", "derogatory", "derogatory"),
    ("doc", "document", "document"),
    ("euph", "euphemistic", "euphemistic"),
    ("ev", "event", "event"),
    ("fam", "familiar", "familiar language"),
    ("fem", "female", "female term or language"),
    ("fict", "fiction", "fiction"),
    ("form", "formal", "formal or literary term"),
    ("given", "given name", "given name or forename, gender not specified"),
    ("group", "group", "group"),
    ("hist", "historical", "historical term"),
    ("hon", "honorific", "honorific or respectful (sonkeigo) language"),
    ("hum", "humble", "humble (kenjougo) language"),
    ("id", "idiom", "idiomatic expression"),
    ("joc", "jocular", "jocular, humorous term"),
    ("leg", "legend", "legend"),
    ("m-sl", "manga slang", "manga slang"),
    ("male", "male", "male term or language"),
    ("myth", "mythology", "mythology"),
    ("net-sl", "Internet slang", "Internet slang"),
    ("obj", "object", "object"),
    ("obs", "obsolete", "obsolete term"),
    ("on-mim", "onomatopoeia", "onomatopoeic or mimetic word"),
    ("organization", "organization", "organization name"),
    ("oth", "other", "other"),
    ("person", "person", "full name of a particular person"),
    ("place", "place", "place name"),
    ("poet", "poetical", "poetical term"),
    ("pol", "polite", "polite (teineigo) language"),
    ("product", "product", "product name"),
    ("proverb", "proverb", "proverb"),
    ("quote", "quotation", "quotation"),
    ("rare", "rare", "rare term"),
    ("relig", "religion", "religion"),
    ("sens", "sensitive", "sensitive"),
    ("serv", "service", "service"),
    ("ship", "ship", "ship name"),
    ("sl", "slang", "slang"),
    ("station", "station", "railway station"),
    ("surname", "surname", "family or surname"),
    ("uk", "usually kana", "word usually written using kana alone"),
    ("unclass", "unclassified name", "unclassified name"),
    ("vulg", "vulgar", "vulgar expression or word"),
    ("work", "work", "work of art, literature, music, etc. name"),
    ("X", "X-rated", "rude or X-rated term (not displayed in educational software)"),
    ("yoji", "yojijukugo", "yojijukugo"),
    // parts of speech
    ("adj-f", "prenominal", "noun or verb acting prenominally"),
    ("adj-i", "adjective", "adjective (keiyoushi)"),
    ("adj-ix", "adjective (yoi/ii)", "adjective (keiyoushi) - yoi/ii class"),
    ("adj-kari", "kari adjective", "'kari' adjective (archaic)"),
    ("adj-ku", "ku adjective", "'ku' adjective (archaic)"),
    ("adj-na", "na-adjective", "adjectival nouns or quasi-adjectives (keiyodoshi)"),
    ("adj-nari", "nari adjective", "archaic/formal form of na-adjective"),
    ("adj-no", "no-adjective", "nouns which may take the genitive case particle 'no'"),
    ("adj-pn", "pre-noun adjectival", "pre-noun adjectival (rentaishi)"),
    ("adj-shiku", "shiku adjective", "'shiku' adjective (archaic)"),
    ("adj-t", "taru adjective", "'taru' adjective"),
    ("adv", "adverb", "adverb (fukushi)"),
    ("adv-to", "to-adverb", "adverb taking the 'to' particle"),
    ("aux", "auxiliary", "auxiliary"),
    ("aux-adj", "auxiliary adjective", "auxiliary adjective"),
    ("aux-v", "auxiliary verb", "auxiliary verb"),
    ("conj", "conjunction", "conjunction"),
    ("cop", "copula", "copula"),
    ("ctr", "counter", "counter"),
    ("exp", "expression", "expressions (phrases, clauses, etc.)"),
    ("int", "interjection", "interjection (kandoushi)"),
    ("n", "noun", "noun (common) (futsuumeishi)"),
    ("n-adv", "adverbial noun", "adverbial noun (fukushitekimeishi)"),
    ("n-pr", "proper noun", "proper noun"),
    ("n-pref", "noun prefix", "noun, used as a prefix"),
    ("n-suf", "noun suffix", "noun, used as a suffix"),
    ("n-t", "temporal noun", "noun (temporal) (jisoumeishi)"),
    ("num", "numeric", "numeric"),
    ("pn", "pronoun", "pronoun"),
    ("pref", "prefix", "prefix"),
    ("prt", "particle", "particle"),
    ("suf", "suffix", "suffix"),
    ("unc", "unclassified", "unclassified"),
    ("v-unspec", "verb", "verb unspecified"),
    ("v1", "ichidan verb", "Ichidan verb"),
    ("v1-s", "ichidan verb (kureru)", "Ichidan verb - kureru special class"),
    ("v2a-s", "nidan verb -u", "Nidan verb with 'u' ending (archaic)"),
    ("v4h", "yodan verb -hu", "Yodan verb with 'hu/fu' ending (archaic)"),
    ("v4r", "yodan verb -ru", "Yodan verb with 'ru' ending (archaic)"),
    ("v5aru", "godan verb -aru", "Godan verb - -aru special class"),
    ("v5b", "godan verb -bu", "Godan verb with 'bu' ending"),
    ("v5g", "godan verb -gu", "Godan verb with 'gu' ending"),
    ("v5k", "godan verb -ku", "Godan verb with 'ku' ending"),
    ("v5k-s", "godan verb iku/yuku", "Godan verb - Iku/Yuku special class"),
    ("v5m", "godan verb -mu", "Godan verb with 'mu' ending"),
    ("v5n", "godan verb -nu", "Godan verb with 'nu' ending"),
    ("v5r", "godan verb -ru", "Godan verb with 'ru' ending"),
    ("v5r-i", "godan verb -ru (irregular)", "Godan verb with 'ru' ending (irregular verb)"),
    ("v5s", "godan verb -su", "Godan verb with 'su' ending"),
    ("v5t", "godan verb -tsu", "Godan verb with 'tsu' ending"),
    ("v5u", "godan verb -u", "Godan verb with 'u' ending"),
    ("v5u-s", "godan verb -u (special)", "Godan verb with 'u' ending (special class)"),
    ("vi", "intransitive", "intransitive verb"),
    ("vk", "kuru verb", "Kuru verb - special class"),
    ("vn", "nu verb", "irregular nu verb"),
    ("vr", "ru verb", "irregular ru verb, plain form ends with -ri"),
    ("vs", "suru verb", "noun or participle which takes the aux. verb suru"),
    ("vs-c", "su verb", "su verb - precursor to the modern suru"),
    ("vs-i", "suru verb (included)", "suru verb - included"),
    ("vs-s", "suru verb (special)", "suru verb - special class"),
    ("vt", "transitive", "transitive verb"),
    ("vz", "zuru verb", "Ichidan verb - zuru verb (alternative form of -jiru verbs)"),
];
