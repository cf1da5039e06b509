//! Property tests for the packet catalog.
//!
//! Every packet type is generated from shared random ingredients and checked
//! for three things: the frame decodes back to the same packet, the size walk
//! matches the bytes produced, and no truncation or random input panics.

use proptest::prelude::*;

use protocol::{
    AttrsPacket, DataPacket, ExtendedPacket, ExtendedReplyPacket, ExtendedRequest, ExtensionPair,
    FileAttributes, FileTimes, HandleAttrsRequest, HandleRequest, NamePacket, NamedFile,
    OpenFlags, OpenRequest, Ownership, Packet, PacketType, PathAttrsRequest, PathRequest,
    ReadRequest, RenameRequest, StatusCode, StatusPacket, SymlinkRequest, VersionPacket,
    WriteRequest,
};

#[derive(Clone, Debug)]
struct Ingredients {
    id: u32,
    first: Vec<u8>,
    second: Vec<u8>,
    offset: u64,
    len: u32,
    attrs: FileAttributes,
    names: Vec<NamedFile>,
    pairs: Vec<ExtensionPair>,
}

fn bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..max)
}

fn pairs() -> impl Strategy<Value = Vec<ExtensionPair>> {
    prop::collection::vec(
        (bytes(12), bytes(12)).prop_map(|(name, data)| ExtensionPair::new(name, data)),
        0..4,
    )
}

fn attrs() -> impl Strategy<Value = FileAttributes> {
    (
        proptest::option::of(any::<u64>()),
        proptest::option::of((any::<u32>(), any::<u32>())),
        proptest::option::of(any::<u32>()),
        proptest::option::of((any::<u32>(), any::<u32>())),
        proptest::option::of(pairs()),
    )
        .prop_map(|(size, owner, permissions, times, extended)| FileAttributes {
            size,
            owner: owner.map(|(uid, gid)| Ownership { uid, gid }),
            permissions,
            times: times.map(|(atime, mtime)| FileTimes { atime, mtime }),
            extended,
        })
}

fn names() -> impl Strategy<Value = Vec<NamedFile>> {
    prop::collection::vec(
        (bytes(16), bytes(32), attrs())
            .prop_map(|(filename, longname, attrs)| NamedFile::new(filename, longname, attrs)),
        0..4,
    )
}

fn ingredients() -> impl Strategy<Value = Ingredients> {
    (
        (any::<u32>(), bytes(64), bytes(64), any::<u64>(), any::<u32>()),
        (attrs(), names(), pairs()),
    )
        .prop_map(
            |((id, first, second, offset, len), (attrs, names, pairs))| Ingredients {
                id,
                first,
                second,
                offset,
                len,
                attrs,
                names,
                pairs,
            },
        )
}

fn build(kind: PacketType, ing: Ingredients) -> Packet {
    let Ingredients {
        id,
        first,
        second,
        offset,
        len,
        attrs,
        names,
        pairs,
    } = ing;
    let path = || PathRequest {
        id,
        path: first.clone(),
    };
    let handle = || HandleRequest {
        id,
        handle: first.clone(),
    };
    match kind {
        PacketType::Init => Packet::Init(VersionPacket {
            version: id,
            extensions: pairs,
        }),
        PacketType::Version => Packet::Version(VersionPacket {
            version: id,
            extensions: pairs,
        }),
        PacketType::Open => Packet::Open(OpenRequest {
            id,
            filename: first,
            pflags: OpenFlags::from_bits(len),
            attrs,
        }),
        PacketType::Close => Packet::Close(handle()),
        PacketType::Read => Packet::Read(ReadRequest {
            id,
            handle: first,
            offset,
            len,
        }),
        PacketType::Write => Packet::Write(WriteRequest {
            id,
            handle: first,
            offset,
            data: second,
        }),
        PacketType::LStat => Packet::LStat(path()),
        PacketType::FStat => Packet::FStat(handle()),
        PacketType::SetStat => Packet::SetStat(PathAttrsRequest {
            id,
            path: first,
            attrs,
        }),
        PacketType::FSetStat => Packet::FSetStat(HandleAttrsRequest {
            id,
            handle: first,
            attrs,
        }),
        PacketType::OpenDir => Packet::OpenDir(path()),
        PacketType::ReadDir => Packet::ReadDir(handle()),
        PacketType::Remove => Packet::Remove(path()),
        PacketType::MkDir => Packet::MkDir(PathAttrsRequest {
            id,
            path: first,
            attrs,
        }),
        PacketType::RmDir => Packet::RmDir(path()),
        PacketType::RealPath => Packet::RealPath(path()),
        PacketType::Stat => Packet::Stat(path()),
        PacketType::Rename => Packet::Rename(RenameRequest {
            id,
            old_path: first,
            new_path: second,
        }),
        PacketType::ReadLink => Packet::ReadLink(path()),
        PacketType::Symlink => Packet::Symlink(SymlinkRequest {
            id,
            link_path: first,
            target_path: second,
        }),
        PacketType::Status => Packet::Status(StatusPacket::new(
            id,
            StatusCode::from_u32(len),
            second,
        )),
        PacketType::Handle => Packet::Handle(handle()),
        PacketType::Data => Packet::Data(DataPacket { id, data: second }),
        PacketType::Name => Packet::Name(NamePacket { id, files: names }),
        PacketType::Attrs => Packet::Attrs(AttrsPacket { id, attrs }),
        PacketType::Extended => {
            let request = match len % 5 {
                0 => ExtendedRequest::PosixRename {
                    old_path: first,
                    new_path: second,
                },
                1 => ExtendedRequest::StatVfs { path: first },
                2 => ExtendedRequest::FStatVfs { handle: first },
                3 => ExtendedRequest::HardLink {
                    old_path: first,
                    new_path: second,
                },
                _ => ExtendedRequest::Fsync { handle: first },
            };
            Packet::Extended(ExtendedPacket { id, request })
        }
        PacketType::ExtendedReply => Packet::ExtendedReply(ExtendedReplyPacket { id, data: second }),
    }
}

fn packet() -> impl Strategy<Value = Packet> {
    (prop::sample::select(PacketType::ALL.to_vec()), ingredients())
        .prop_map(|(kind, ing)| build(kind, ing))
}

/// Types whose body ends in an uncounted tail; a truncated body may still
/// decode.
fn has_open_tail(kind: PacketType) -> bool {
    matches!(
        kind,
        PacketType::Init | PacketType::Version | PacketType::ExtendedReply
    )
}

proptest! {
    #[test]
    fn frame_round_trips(packet in packet()) {
        let bytes = packet.to_frame_bytes().expect("frame fits");
        let (decoded, rest) = Packet::decode_frame(&bytes, u32::MAX).expect("decodes");
        prop_assert_eq!(&decoded, &packet);
        prop_assert!(rest.is_empty());
    }

    #[test]
    fn size_walk_matches_encoded_length(packet in packet()) {
        let bytes = packet.to_frame_bytes().expect("frame fits");
        prop_assert_eq!(bytes.len(), 4 + 1 + packet.body_len());

        let declared = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        prop_assert_eq!(declared, packet.frame_len());
        prop_assert_eq!(bytes[4], packet.packet_type().as_u8());
    }

    #[test]
    fn truncated_frames_are_short(packet in packet()) {
        let bytes = packet.to_frame_bytes().expect("frame fits");
        for cut in 0..bytes.len() {
            let err = Packet::decode_frame(&bytes[..cut], u32::MAX).expect_err("incomplete");
            prop_assert!(err.is_short_packet(), "cut {} gave {:?}", cut, err);
        }
    }

    #[test]
    fn truncated_bodies_never_panic(packet in packet()) {
        let kind = packet.packet_type();
        let bytes = packet.to_frame_bytes().expect("frame fits");
        let body = &bytes[5..];
        for cut in 0..body.len() {
            match Packet::decode(kind.as_u8(), &body[..cut]) {
                Ok(_) => prop_assert!(has_open_tail(kind), "{} decoded from {} bytes", kind, cut),
                Err(err) => prop_assert!(err.is_short_packet(), "{} at {}: {:?}", kind, cut, err),
            }
        }
    }

    #[test]
    fn random_bodies_never_panic(tag in any::<u8>(), body in bytes(256)) {
        let _ = Packet::decode(tag, &body);
    }
}

#[test]
fn strings_larger_than_64_kib_round_trip() {
    let data = vec![0x5A; 70_000];
    let packet = Packet::Write(WriteRequest {
        id: 1,
        handle: b"0".to_vec(),
        offset: 0,
        data: data.clone(),
    });

    let bytes = packet.to_frame_bytes().expect("frame fits");
    assert_eq!(bytes.len(), 4 + 1 + 4 + (4 + 1) + 8 + (4 + data.len()));

    let (decoded, _) = Packet::decode_frame(&bytes, protocol::DEFAULT_MAX_FRAME_LEN).expect("decodes");
    assert_eq!(decoded, packet);
}
