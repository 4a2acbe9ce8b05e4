mod bitstream_tests {
    use std::io::Cursor;

    use libonda_audio::bitstream::{BitReader, BitWriter};
    use libonda_audio::OndaError;

    #[test]
    fn test_single_bits_pack_msb_first() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [1, 0, 1, 1, 0, 0, 1, 1] {
            writer.write_bit(bit).unwrap();
        }
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes, vec![0b1011_0011]);
    }

    #[test]
    fn test_partial_byte_is_zero_padded_on_finish() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(1).unwrap();
        writer.write_bit(1).unwrap();
        writer.write_bit(1).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes, vec![0b1110_0000]);
    }

    #[test]
    fn test_round_trip_at_every_width() {
        for n in 1..=64u8 {
            let all_ones = if n == 64 { u64::MAX } else { (1u64 << n) - 1 };
            let patterns = [0u64, 1, all_ones, 0xAAAA_AAAA_AAAA_AAAA & all_ones];
            for &value in &patterns {
                let mut writer = BitWriter::new(Vec::new());
                writer.write_bits(value, n).unwrap();
                let bytes = writer.finish().unwrap();

                let mut reader = BitReader::new(Cursor::new(bytes));
                assert_eq!(
                    reader.read_bits(n).unwrap(),
                    value,
                    "width {} failed to round-trip {:#x}",
                    n,
                    value
                );
            }
        }
    }

    #[test]
    fn test_mixed_field_sequence_round_trips() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(44_100, 32).unwrap();
        writer.write_bits(1337, 16).unwrap();
        writer.write_bits(21, 6).unwrap();
        writer.write_bit(1).unwrap();
        writer.write_bits(0x1FFF, 13).unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(bytes));
        assert_eq!(reader.read_bits(32).unwrap(), 44_100);
        assert_eq!(reader.read_bits(16).unwrap(), 1337);
        assert_eq!(reader.read_bits(6).unwrap(), 21);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bits(13).unwrap(), 0x1FFF);
    }

    #[test]
    fn test_bit_position_tracks_both_directions() {
        let mut writer = BitWriter::new(Vec::new());
        assert_eq!(writer.bit_position(), 0);
        writer.write_bits(0b101, 3).unwrap();
        assert_eq!(writer.bit_position(), 3);
        writer.write_bits(0xFFFF, 16).unwrap();
        assert_eq!(writer.bit_position(), 19);
        let bytes = writer.finish().unwrap();
        // 19 bits pad out to 3 bytes
        assert_eq!(bytes.len(), 3);

        let mut reader = BitReader::new(Cursor::new(bytes));
        reader.read_bits(3).unwrap();
        assert_eq!(reader.bit_position(), 3);
        reader.read_bits(16).unwrap();
        assert_eq!(reader.bit_position(), 19);
    }

    #[test]
    fn test_reading_past_the_end_reports_eof() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xAB, 8).unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(bytes));
        assert_eq!(reader.read_bits(8).unwrap(), 0xAB);
        assert!(matches!(reader.read_bit(), Err(OndaError::UnexpectedEof)));
    }

    #[test]
    fn test_eof_mid_field_reports_eof() {
        // 12 bits land in 2 bytes on the wire; asking for 17 must fail.
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xFFF, 12).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes.len(), 2);

        let mut reader = BitReader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.read_bits(17),
            Err(OndaError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_zero_width_writes_and_reads_nothing() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xDEAD_BEEF, 0).unwrap();
        assert_eq!(writer.bit_position(), 0);
        let bytes = writer.finish().unwrap();
        assert!(bytes.is_empty());

        let mut reader = BitReader::new(Cursor::new(bytes));
        assert_eq!(reader.read_bits(0).unwrap(), 0);
        assert_eq!(reader.bit_position(), 0);
    }

    #[test]
    fn test_field_bits_are_contiguous_across_byte_boundaries() {
        // 4 + 8 bits: the second field straddles the first and second bytes.
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b1001, 4).unwrap();
        writer.write_bits(0b1100_0011, 8).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes, vec![0b1001_1100, 0b0011_0000]);
    }
}
