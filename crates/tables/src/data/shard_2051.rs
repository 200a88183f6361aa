//! Lunisolar year table, shard 2051–2125.
//!
//! Generated asset; see the packed-entry layout in `shard.rs`.

pub(crate) const FIRST_YEAR: i32 = 2051;
pub(crate) const LAST_YEAR: i32 = 2125;

#[rustfmt::skip]
pub(crate) const ENTRIES: &[u32] = &[
    0x004C0595, // 2051
    0x0034435D, // 2052
    0x005A05A5, // 2053
    0x00440167, // 2054
    0x002CB5D4, // 2055
    0x00540E54, // 2056
    0x003AF555, // 2057
    0x0062025D, // 2058
    0x004C05D4, // 2059
    0x00354755, // 2060
    0x005A0555, // 2061
    0x00440559, // 2062
    0x002CFDA4, // 2063
    0x00540555, // 2064
    0x003ADD54, // 2065
    0x00620535, // 2066
    0x004C04E5, // 2067
    0x00353C55, // 2068
    0x005A0547, // 2069
    0x004405D4, // 2070
    0x002D35D1, // 2071
    0x00540754, // 2072
    0x003AB555, // 2073
    0x006201DC, // 2074
    0x004C0555, // 2075
    0x00350D55, // 2076
    0x005A0E70, // 2077
    0x00440356, // 2078
    0x002C54DC, // 2079
    0x00540D15, // 2080
    0x003A9517, // 2081
    0x006208C7, // 2082
    0x004C01D3, // 2083
    0x0034E5E5, // 2084
    0x005A0547, // 2085
    0x00440475, // 2086
    0x002D5599, // 2087
    0x005405B4, // 2088
    0x003A755C, // 2089
    0x00620D54, // 2090
    0x004C0D15, // 2091
    0x0034DC1D, // 2092
    0x005A0535, // 2093
    0x004405B1, // 2094
    0x002D3497, // 2095
    0x00540555, // 2096
    0x003A5555, // 2097
    0x00620175, // 2098
    0x004C05D1, // 2099
    0x0034B4D5, // 2100
    0x005C0555, // 2101
    0x00460559, // 2102
    0x002F1517, // 2103
    0x00560571, // 2104
    0x003D5555, // 2105
    0x00640587, // 2106
    0x004E00F5, // 2107
    0x003685F1, // 2108
    0x005C0175, // 2109
    0x00460475, // 2110
    0x002EF595, // 2111
    0x00560595, // 2112
    0x003D3751, // 2113
    0x0064013D, // 2114
    0x004E05A5, // 2115
    0x00367565, // 2116
    0x005C0556, // 2117
    0x004604CD, // 2118
    0x002ED754, // 2119
    0x005605D8, // 2120
    0x003D1655, // 2121
    0x00640555, // 2122
    0x004E0555, // 2123
    0x003655D1, // 2124
    0x005C0371, // 2125
];
