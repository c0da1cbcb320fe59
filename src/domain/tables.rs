use phf::phf_set;

/// Generic TLDs (three letters and up) plus the ISO 3166 country codes.
pub(crate) const KNOWN_TLDS: phf::Set<&'static str> = phf_set! {
    // generic
    "com", "net", "org", "edu", "gov", "mil", "int", "info", "biz", "name", "pro",
    "aero", "asia", "cat", "coop", "jobs", "mobi", "museum", "post", "tel", "travel",
    "xxx", "app", "dev", "page", "shop", "store", "online", "site", "website", "tech",
    "xyz", "club", "blog", "cloud", "email", "host", "live", "news", "media", "agency",
    "company", "digital", "network", "solutions", "systems", "software", "studio",
    "design", "art", "law", "bank", "insurance", "health", "academy", "university",
    "school", "social", "world", "global", "group", "team", "zone", "life", "space",
    "today", "top", "vip", "one", "icu", "work", "link", "click", "help", "support",
    "services", "center", "expert", "guru", "ninja", "rocks", "codes", "army", "navy",
    "eco", "ngo", "ong", "gay", "kids", "music", "film", "video", "photo", "photos",
    "pics", "game", "games", "bet", "casino", "poker", "sport", "golf", "run", "fit",
    "yoga", "cafe", "bar", "pub", "pizza", "restaurant", "wine", "beer", "vodka",
    "hotel", "tours", "flights", "cars", "auto", "bike", "taxi", "money",
    "finance", "capital", "fund", "cash", "credit", "tax", "consulting", "legal",
    // country codes
    "ac", "ad", "ae", "af", "ag", "ai", "al", "am", "ao", "aq", "ar", "as", "at", "au",
    "aw", "ax", "az", "ba", "bb", "bd", "be", "bf", "bg", "bh", "bi", "bj", "bm", "bn",
    "bo", "br", "bs", "bt", "bw", "by", "bz", "ca", "cc", "cd", "cf", "cg", "ch", "ci",
    "ck", "cl", "cm", "cn", "co", "cr", "cu", "cv", "cw", "cx", "cy", "cz", "de", "dj",
    "dk", "dm", "do", "dz", "ec", "ee", "eg", "er", "es", "et", "eu", "fi", "fj", "fk",
    "fm", "fo", "fr", "ga", "gd", "ge", "gf", "gg", "gh", "gi", "gl", "gm", "gn", "gp",
    "gq", "gr", "gs", "gt", "gu", "gw", "gy", "hk", "hm", "hn", "hr", "ht", "hu", "id",
    "ie", "il", "im", "in", "io", "iq", "ir", "is", "it", "je", "jm", "jo", "jp", "ke",
    "kg", "kh", "ki", "km", "kn", "kp", "kr", "kw", "ky", "kz", "la", "lb", "lc", "li",
    "lk", "lr", "ls", "lt", "lu", "lv", "ly", "ma", "mc", "md", "me", "mg", "mh", "mk",
    "ml", "mm", "mn", "mo", "mp", "mq", "mr", "ms", "mt", "mu", "mv", "mw", "mx", "my",
    "mz", "na", "nc", "ne", "nf", "ng", "ni", "nl", "no", "np", "nr", "nu", "nz", "om",
    "pa", "pe", "pf", "pg", "ph", "pk", "pl", "pm", "pn", "pr", "ps", "pt", "pw", "py",
    "qa", "re", "ro", "rs", "ru", "rw", "sa", "sb", "sc", "sd", "se", "sg", "sh", "si",
    "sk", "sl", "sm", "sn", "so", "sr", "ss", "st", "su", "sv", "sx", "sy", "sz", "tc",
    "td", "tf", "tg", "th", "tj", "tk", "tl", "tm", "tn", "to", "tr", "tt", "tv", "tw",
    "tz", "ua", "ug", "uk", "us", "uy", "uz", "va", "vc", "ve", "vg", "vi", "vn", "vu",
    "wf", "ws", "ye", "yt", "za", "zm", "zw",
};

/// City and region TLDs.
pub(crate) const GEOGRAPHIC_TLDS: phf::Set<&'static str> = phf_set! {
    "berlin", "hamburg", "koeln", "cologne", "bayern", "nrw", "ruhr", "saarland",
    "wien", "tirol", "zuerich", "swiss", "london", "paris", "nyc", "tokyo", "osaka",
    "nagoya", "yokohama", "kyoto", "amsterdam", "brussels", "vlaanderen", "gent",
    "barcelona", "madrid", "bzh", "eus", "gal", "scot", "wales", "cymru", "quebec",
    "miami", "vegas", "boston", "melbourne", "sydney", "moscow", "istanbul", "ist",
    "capetown", "durban", "joburg", "africa", "lat", "krd", "frl", "irish", "corsica",
    "alsace", "budapest", "rio", "taipei", "okinawa",
};

/// Internationalized TLDs in their ACE form.
pub(crate) const LOCALIZED_TLDS: phf::Set<&'static str> = phf_set! {
    "xn--p1ai", "xn--80asehdb", "xn--fiqs8s", "xn--fiqz9s", "xn--j6w193g",
    "xn--mgbaam7a8h", "xn--90ais", "xn--d1alf", "xn--wgbh1c", "xn--3e0b707e",
    "xn--kprw13d", "xn--kpry57d", "xn--node", "xn--qxam", "xn--e1a4c", "xn--80ao21a",
    "xn--l1acc", "xn--54b7fta0cc", "xn--h2brj9c", "xn--ses554g", "xn--55qx5d",
    "xn--io0a7i",
};

pub(crate) const RESERVED_TLDS: phf::Set<&'static str> = phf_set! {
    "test", "example", "invalid", "onion",
};

pub(crate) const LOCAL_NAMES: phf::Set<&'static str> = phf_set! {
    "localhost", "local", "localdomain", "lan", "home", "internal", "intranet", "corp",
};

/// Registrable domains of dynamic DNS providers.
pub(crate) const DYNAMIC_DNS: phf::Set<&'static str> = phf_set! {
    "dyndns.org", "dyndns.biz", "dyndns.info", "dyndns.tv", "homeip.net", "no-ip.com",
    "no-ip.org", "no-ip.biz", "no-ip.info", "ddns.net", "hopto.org", "zapto.org",
    "servebeer.com", "sytes.net", "duckdns.org", "dynu.com", "dynu.net", "afraid.org",
    "changeip.com", "dnsdynamic.org", "dynv6.net", "myftp.org", "myftp.biz",
    "redirectme.net", "serveftp.com", "selfip.com", "dtdns.net", "ddnsking.com",
};
