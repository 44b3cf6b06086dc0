use std::time::{SystemTime, UNIX_EPOCH};

/// VHD timestamps count seconds from 2000-01-01T00:00:00Z. This is that instant as a Unix time.
pub const VHD_EPOCH_UNIX: i64 = 946_684_800;

/// Converts a system time to a VHD timestamp, clamped to the field range.
pub fn vhd_timestamp(time: SystemTime) -> i32 {
    let unix = match time.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => -i64::try_from(e.duration().as_secs()).unwrap_or(i64::MAX),
    };

    unix.saturating_sub(VHD_EPOCH_UNIX)
        .clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

pub fn vhd_now() -> i32 {
    vhd_timestamp(SystemTime::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn epoch_is_zero() {
        let epoch = UNIX_EPOCH + Duration::from_secs(VHD_EPOCH_UNIX as u64);
        assert_eq!(vhd_timestamp(epoch), 0);
    }

    #[test]
    fn one_day_later() {
        let t = UNIX_EPOCH + Duration::from_secs(VHD_EPOCH_UNIX as u64 + 86_400);
        assert_eq!(vhd_timestamp(t), 86_400);
    }

    #[test]
    fn before_epoch_is_negative() {
        assert_eq!(vhd_timestamp(UNIX_EPOCH), -(VHD_EPOCH_UNIX as i32));
    }

    #[test]
    fn far_future_clamps() {
        let t = UNIX_EPOCH + Duration::from_secs(1 << 40);
        assert_eq!(vhd_timestamp(t), i32::MAX);
    }
}
