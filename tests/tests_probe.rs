//! Tests for the probe data structure: default generators, builder setters
//! and contact materialization.

use probeinterface::{
    ContactAnnotations, ContactShape, ContactShapeParams, Dimensionality, PlanarPosition,
    PlaneAxes, Probe, ProbeAnnotations, ProbeGroup, ProbeInterfaceError, SiUnits,
};

fn line_positions(n: usize) -> Vec<PlanarPosition> {
    (0..n).map(|i| PlanarPosition::new(i as f64, 0.0)).collect()
}

fn line_probe(n: usize) -> Probe {
    let mut probe = Probe::new(Dimensionality::Two, SiUnits::Micrometers);
    probe
        .set_contacts(
            line_positions(n),
            Probe::default_contact_shapes(n, ContactShape::Circle),
            Probe::default_circle_params(n, 5.0),
        )
        .unwrap();
    probe
}

mod default_generators {
    use super::*;

    #[test]
    fn test_default_contact_shapes() {
        let shapes = Probe::default_contact_shapes(4, ContactShape::Square);
        assert_eq!(shapes, vec![ContactShape::Square; 4]);
    }

    #[test]
    fn test_default_contact_plane_axes() {
        let axes = Probe::default_contact_plane_axes(3);
        assert_eq!(axes.len(), 3);
        for pair in &axes {
            assert_eq!(*pair, PlaneAxes::canonical());
            assert_eq!(pair.primary, PlanarPosition::new(1.0, 0.0));
            assert_eq!(pair.secondary, PlanarPosition::new(0.0, 1.0));
        }
    }

    #[test]
    fn test_default_shape_params() {
        let circles = Probe::default_circle_params(2, 0.3);
        assert_eq!(circles, vec![ContactShapeParams::circle(0.3); 2]);
        assert_eq!(circles[0].radius, Some(0.3));
        assert_eq!(circles[0].width, None);

        let squares = Probe::default_square_params(2, 10.0);
        assert_eq!(squares[1].width, Some(10.0));
        assert_eq!(squares[1].radius, None);

        let rects = Probe::default_rect_params(2, 10.0, 20.0);
        assert_eq!(rects[0].width, Some(10.0));
        assert_eq!(rects[0].height, Some(20.0));
    }

    #[test]
    fn test_default_device_channel_indices_applies_offset() {
        assert_eq!(Probe::default_device_channel_indices(4, 0), vec![0, 1, 2, 3]);
        assert_eq!(Probe::default_device_channel_indices(3, 16), vec![16, 17, 18]);
        assert!(Probe::default_device_channel_indices(0, 5).is_empty());
    }

    #[test]
    fn test_default_contact_ids_are_stringified_indices() {
        assert_eq!(
            Probe::default_contact_ids(3),
            vec!["0".to_string(), "1".to_string(), "2".to_string()]
        );
    }

    #[test]
    fn test_default_shank_ids_are_empty_strings() {
        let ids = Probe::default_shank_ids(3);
        assert_eq!(ids, vec![String::new(); 3]);
    }
}

mod builder {
    use super::*;

    #[test]
    fn test_set_contacts_defines_contact_count() {
        let probe = line_probe(5);
        assert_eq!(probe.number_of_contacts(), 5);
        assert_eq!(probe.contact_positions().len(), 5);
        assert_eq!(probe.contact_shapes().len(), 5);
        assert_eq!(probe.contact_shape_params().len(), 5);
    }

    #[test]
    fn test_set_contacts_rejects_mismatched_shapes() {
        let mut probe = Probe::new(Dimensionality::Two, SiUnits::Micrometers);
        let result = probe.set_contacts(
            line_positions(3),
            Probe::default_contact_shapes(2, ContactShape::Circle),
            Probe::default_circle_params(3, 5.0),
        );
        assert!(matches!(result, Err(ProbeInterfaceError::LengthMismatch(_))));
    }

    #[test]
    fn test_set_contacts_rejects_mismatched_params() {
        let mut probe = Probe::new(Dimensionality::Two, SiUnits::Micrometers);
        let result = probe.set_contacts(
            line_positions(3),
            Probe::default_contact_shapes(3, ContactShape::Circle),
            Probe::default_circle_params(4, 5.0),
        );
        assert!(matches!(result, Err(ProbeInterfaceError::LengthMismatch(_))));
    }

    #[test]
    fn test_per_contact_setters_check_length() {
        let mut probe = line_probe(3);

        assert!(probe.set_contact_ids(vec!["0".into(), "1".into()]).is_err());
        assert!(probe.set_device_channel_indices(vec![0, 1, 2, 3]).is_err());
        assert!(probe.set_shank_ids(vec![String::new(); 2]).is_err());
        assert!(probe
            .set_contact_plane_axes(Probe::default_contact_plane_axes(2))
            .is_err());
        assert!(probe
            .set_contact_annotations(ContactAnnotations::new(vec!["a".into()]))
            .is_err());

        assert!(probe
            .set_contact_ids(vec!["0".into(), "1".into(), "2".into()])
            .is_ok());
        assert!(probe.set_device_channel_indices(vec![0, 1, 2]).is_ok());
        assert!(probe.set_shank_ids(vec![String::new(); 3]).is_ok());
        assert!(probe
            .set_contact_plane_axes(Probe::default_contact_plane_axes(3))
            .is_ok());
        assert!(probe
            .set_contact_annotations(ContactAnnotations::new(vec![
                "a".into(),
                "b".into(),
                "c".into()
            ]))
            .is_ok());
    }

    #[test]
    fn test_planar_contour_has_free_length() {
        let mut probe = line_probe(3);
        probe.set_planar_contour(vec![
            PlanarPosition::new(0.5, 0.5),
            PlanarPosition::new(3.5, 0.5),
            PlanarPosition::new(3.5, 1.5),
            PlanarPosition::new(0.5, 1.5),
            PlanarPosition::new(0.5, 0.5),
        ]);
        assert_eq!(probe.probe_planar_contour().unwrap().len(), 5);
    }

    #[test]
    fn test_annotations() {
        let mut probe = line_probe(2);
        probe.set_annotations(ProbeAnnotations::new(
            Some("ASSY-156".to_string()),
            Some("cambridgeneurotech".to_string()),
        ));
        assert_eq!(probe.annotations().name.as_deref(), Some("ASSY-156"));
        assert_eq!(
            probe.annotations().manufacturer.as_deref(),
            Some("cambridgeneurotech")
        );
    }
}

mod contact_materialization {
    use super::*;

    #[test]
    fn test_contact_out_of_range() {
        let probe = line_probe(2);
        let result = probe.contact(2);
        assert!(matches!(result, Err(ProbeInterfaceError::InvalidInput(_))));
    }

    #[test]
    fn test_contact_before_defaults_are_populated() {
        let probe = line_probe(2);
        // No ids, shanks or channel wiring yet, so nothing to materialize.
        let result = probe.contact(0);
        assert!(matches!(result, Err(ProbeInterfaceError::InvalidInput(_))));
    }

    #[test]
    fn test_contact_after_group_validation() {
        let group = ProbeGroup::from_probes(vec![line_probe(3)]).unwrap();
        let probe = &group.probes()[0];

        let contact = probe.contact(1).unwrap();
        assert_eq!(contact.index, 1);
        assert_eq!(contact.position, PlanarPosition::new(1.0, 0.0));
        assert_eq!(contact.shape, ContactShape::Circle);
        assert_eq!(contact.shape_params.radius, Some(5.0));
        assert_eq!(contact.contact_id, "1");
        assert_eq!(contact.shank_id, "");
        assert_eq!(contact.device_channel_index, 1);

        let contacts = probe.contacts().unwrap();
        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[2].index, 2);
    }
}
