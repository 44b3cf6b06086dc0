//! Property tests for the footer codec and checksum.

use proptest::prelude::*;
use vhd::{
    FOOTER_SIZE, FixedDiskFooter, FooterBytes, Geometry, compute_checksum, finalize_checksum,
    has_existing_footer,
};

fn arb_geometry() -> impl Strategy<Value = Geometry> {
    (any::<u16>(), any::<u8>(), any::<u8>()).prop_map(|(cylinders, heads, sectors)| Geometry {
        cylinders,
        heads,
        sectors,
    })
}

fn arb_footer() -> impl Strategy<Value = FixedDiskFooter> {
    (
        (
            any::<[u8; 8]>(),
            any::<u32>(),
            any::<u32>(),
            any::<i64>(),
            any::<i32>(),
            any::<[u8; 4]>(),
            any::<u32>(),
            any::<[u8; 4]>(),
        ),
        (
            any::<i64>(),
            any::<i64>(),
            arb_geometry(),
            any::<i32>(),
            any::<i32>(),
            any::<[u8; 16]>(),
            any::<u8>(),
        ),
    )
        .prop_map(
            |(
                (
                    cookie,
                    features,
                    file_format_version,
                    data_offset,
                    timestamp,
                    creator_application,
                    creator_version,
                    creator_host_os,
                ),
                (
                    original_size,
                    current_size,
                    geometry,
                    disk_type,
                    checksum,
                    unique_id,
                    saved_state,
                ),
            )| FixedDiskFooter {
                cookie,
                features,
                file_format_version,
                data_offset,
                timestamp,
                creator_application,
                creator_version,
                creator_host_os,
                original_size,
                current_size,
                geometry,
                disk_type,
                checksum,
                unique_id,
                saved_state,
            },
        )
}

fn arb_bytes() -> impl Strategy<Value = FooterBytes> {
    prop::collection::vec(any::<u8>(), FOOTER_SIZE)
        .prop_map(|v| FooterBytes::from_slice(&v).unwrap())
}

proptest! {
    #[test]
    fn decode_inverts_encode(footer in arb_footer()) {
        let bytes = footer.encode();
        prop_assert_eq!(FixedDiskFooter::decode(bytes.as_bytes()).unwrap(), footer);
    }

    #[test]
    fn reserved_region_stays_zero(footer in arb_footer()) {
        let bytes = footer.to_bytes();
        prop_assert_eq!(bytes.as_bytes().len(), FOOTER_SIZE);
        prop_assert!(bytes.0[85..].iter().all(|&b| b == 0));
    }

    #[test]
    fn sealing_only_touches_checksum(footer in arb_footer()) {
        let encoded = footer.encode();
        let sealed = footer.to_bytes();
        prop_assert_eq!(&encoded.0[..64], &sealed.0[..64]);
        prop_assert_eq!(&encoded.0[68..], &sealed.0[68..]);
    }

    #[test]
    fn checksum_ignores_its_own_field(mut bytes in arb_bytes(), field in any::<[u8; 4]>()) {
        let before = compute_checksum(&bytes);
        bytes.0[64..68].copy_from_slice(&field);
        prop_assert_eq!(compute_checksum(&bytes), before);
    }

    #[test]
    fn checksum_sees_every_other_byte(
        bytes in arb_bytes(),
        index in (0..FOOTER_SIZE).prop_filter("outside checksum field", |i| !(64..68).contains(i)),
        delta in 1u8..=255,
    ) {
        let mut changed = bytes;
        changed.0[index] = changed.0[index].wrapping_add(delta);
        prop_assert_ne!(compute_checksum(&changed), compute_checksum(&bytes));
    }

    #[test]
    fn finalized_checksum_decodes(bytes in arb_bytes()) {
        let mut sealed = bytes;
        finalize_checksum(&mut sealed);
        let footer = FixedDiskFooter::decode(sealed.as_bytes()).unwrap();
        prop_assert_eq!(footer.checksum, compute_checksum(&bytes));
    }

    #[test]
    fn cookie_decides_presence(mut bytes in arb_bytes(), cookie in any::<[u8; 8]>()) {
        bytes.0[..8].copy_from_slice(&cookie);
        prop_assert_eq!(has_existing_footer(bytes.as_bytes()), &cookie == b"conectix");

        bytes.0[..8].copy_from_slice(b"conectix");
        prop_assert!(has_existing_footer(bytes.as_bytes()));
    }
}

#[test]
fn reference_disk_layout() {
    let geometry = Geometry::new(16383, 16, 63).unwrap();
    let footer = FixedDiskFooter::new_fixed(8_455_200_768, geometry);
    assert_eq!(footer.data_offset, -1);
    assert_eq!(footer.disk_type, 2);
    assert_eq!(footer.file_format_version, 0x0001_0000);

    let bytes = footer.to_bytes();
    assert_eq!(bytes.as_bytes().len(), 512);
    assert_eq!(&bytes.0[12..16], &[0x00, 0x01, 0x00, 0x00]);
    assert!(bytes.0[16..24].iter().all(|&b| b == 0xFF));
    assert_eq!(&bytes.0[56..60], &[0x3F, 0xFF, 16, 63]);
    assert_eq!(&bytes.0[60..64], &[0, 0, 0, 2]);
}
