use anyhow::{bail, Context, Result};
use geo::Point;
use glam::DVec3;

/// A point to resolve, as given on the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    /// `lon,lat` in degrees
    LonLat(Point),
    /// `x,y,z` raycast hit on the globe
    Hit(DVec3),
}

impl Query {
    pub fn parse_lon_lat(s: &str) -> Result<Self> {
        let [lon, lat] = parse_components::<2>(s)?;
        if !(-90.0..=90.0).contains(&lat) {
            bail!("Latitude out of range in '{s}': {lat}");
        }
        Ok(Query::LonLat(Point::new(lon, lat)))
    }

    pub fn parse_hit(s: &str) -> Result<Self> {
        let [x, y, z] = parse_components::<3>(s)?;
        let hit = DVec3::new(x, y, z);
        if hit.length_squared() == 0.0 {
            bail!("Hit '{s}' is the globe center");
        }
        Ok(Query::Hit(hit))
    }
}

fn parse_components<const N: usize>(s: &str) -> Result<[f64; N]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        bail!("Expected {N} comma-separated numbers, got '{s}'");
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .with_context(|| format!("Invalid number '{part}' in '{s}'"))?;
        if !slot.is_finite() {
            bail!("Non-finite number '{part}' in '{s}'");
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lon_lat() {
        assert_eq!(
            Query::parse_lon_lat("2.35, 48.85").unwrap(),
            Query::LonLat(Point::new(2.35, 48.85))
        );
        assert!(Query::parse_lon_lat("2.35").is_err());
        assert!(Query::parse_lon_lat("2.35,north").is_err());
        assert!(Query::parse_lon_lat("0,91").is_err());
        assert!(Query::parse_lon_lat("NaN,0").is_err());
    }

    #[test]
    fn test_parse_hit() {
        assert_eq!(
            Query::parse_hit("1,0,-1").unwrap(),
            Query::Hit(DVec3::new(1.0, 0.0, -1.0))
        );
        assert!(Query::parse_hit("0,0,0").is_err());
        assert!(Query::parse_hit("1,2").is_err());
    }
}
