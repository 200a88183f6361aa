//! Lunisolar year table, shard 1976–2050.
//!
//! Generated asset; see the packed-entry layout in `shard.rs`.

pub(crate) const FIRST_YEAR: i32 = 1976;
pub(crate) const LAST_YEAR: i32 = 2050;

#[rustfmt::skip]
pub(crate) const ENTRIES: &[u32] = &[
    0x006205C5, // 1976
    0x004A055C, // 1977
    0x00332357, // 1978
    0x005A04D9, // 1979
    0x00440745, // 1980
    0x002A7D15, // 1981
    0x00520555, // 1982
    0x003AB5CC, // 1983
    0x00620A55, // 1984
    0x004A05D1, // 1985
    0x00331D45, // 1986
    0x005A0555, // 1987
    0x00440745, // 1988
    0x002A55C5, // 1989
    0x005205D1, // 1990
    0x003A8755, // 1991
    0x00620355, // 1992
    0x004A01E5, // 1993
    0x0032F55C, // 1994
    0x005A07D0, // 1995
    0x00440457, // 1996
    0x002B5075, // 1997
    0x0050055C, // 1998
    0x003861C7, // 1999
    0x005E0671, // 2000
    0x0046054D, // 2001
    0x002ED5C4, // 2002
    0x00540D51, // 2003
    0x003D1551, // 2004
    0x00600751, // 2005
    0x004A0C71, // 2006
    0x00325651, // 2007
    0x00580555, // 2008
    0x003EF097, // 2009
    0x00640794, // 2010
    0x004E01D5, // 2011
    0x00375554, // 2012
    0x005A0555, // 2013
    0x0044C5D1, // 2014
    0x00680D1C, // 2015
    0x00520754, // 2016
    0x00392517, // 2017
    0x005E0175, // 2018
    0x00480D15, // 2019
    0x00307555, // 2020
    0x005605F2, // 2021
    0x00420755, // 2022
    0x002C4EAA, // 2023
    0x00540AAA, // 2024
    0x003ACAD5, // 2025
    0x00620335, // 2026
    0x004C0C55, // 2027
    0x0034A5D6, // 2028
    0x005A0D15, // 2029
    0x00440D98, // 2030
    0x002D0D56, // 2031
    0x00540596, // 2032
    0x003A8557, // 2033
    0x00620555, // 2034
    0x004C04D5, // 2035
    0x0034E59D, // 2036
    0x005A043D, // 2037
    0x00440555, // 2038
    0x002D435D, // 2039
    0x00540555, // 2040
    0x003B3574, // 2041
    0x00620559, // 2042
    0x004C0754, // 2043
    0x00353754, // 2044
    0x005A0595, // 2045
    0x00440563, // 2046
    0x002C754D, // 2047
    0x00540555, // 2048
    0x003B1555, // 2049
    0x00620555, // 2050
];
