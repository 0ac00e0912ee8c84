//! Tag id to name tables for the TIFF (IFD0), Exif and GPS directories.
//!
//! Names follow CIPA DC-008 (Exif 2.3). Tables are sorted by id so lookups
//! can binary search.

/// A static, read-only mapping from numeric tag id to tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagLabels {
    entries: &'static [(u16, &'static str)],
}

impl TagLabels {
    /// Wrap a table. `entries` must be sorted by id.
    pub const fn new(entries: &'static [(u16, &'static str)]) -> Self {
        Self { entries }
    }

    /// Look up the name of a tag id.
    pub fn label(&self, tag_id: u16) -> Option<&'static str> {
        self.entries
            .binary_search_by_key(&tag_id, |&(id, _)| id)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Reverse lookup: the id carrying `name`.
    pub fn id_of(&self, name: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|&&(_, label)| label == name)
            .map(|&(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    /// Labels for IFD0 (the TIFF directory).
    pub const TIFF: TagLabels = TagLabels::new(TIFF_LABELS);

    /// Labels for the Exif sub-directory.
    pub const EXIF: TagLabels = TagLabels::new(EXIF_LABELS);

    /// Labels for the GPS sub-directory.
    pub const GPS: TagLabels = TagLabels::new(GPS_LABELS);
}

/// One label table per directory kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSet {
    pub tiff: TagLabels,
    pub exif: TagLabels,
    pub gps: TagLabels,
}

impl LabelSet {
    /// The Exif 2.3 tables.
    pub const fn standard() -> Self {
        Self {
            tiff: TagLabels::TIFF,
            exif: TagLabels::EXIF,
            gps: TagLabels::GPS,
        }
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Name of the IFD0 tag pointing at the Exif directory.
pub const EXIF_IFD_POINTER: &str = "ExifIFDPointer";

/// Name of the IFD0 tag pointing at the GPS directory.
pub const GPS_IFD_POINTER: &str = "GPSIFDPointer";

const TIFF_LABELS: &[(u16, &str)] = &[
    (256, "ImageWidth"),
    (257, "ImageLength"),
    (258, "BitsPerSample"),
    (259, "Compression"),
    (262, "PhotometricInterpretation"),
    (270, "ImageDescription"),
    (271, "Make"),
    (272, "Model"),
    (273, "StripOffsets"),
    (274, "Orientation"),
    (277, "SamplesPerPixel"),
    (278, "RowsPerStrip"),
    (279, "StripByteCounts"),
    (282, "XResolution"),
    (283, "YResolution"),
    (284, "PlanarConfiguration"),
    (296, "ResolutionUnit"),
    (301, "TransferFunction"),
    (305, "Software"),
    (306, "DateTime"),
    (315, "Artist"),
    (318, "WhitePoint"),
    (319, "PrimaryChromaticities"),
    (513, "JPEGInterchangeFormat"),
    (514, "JPEGInterchangeFormatLength"),
    (529, "YCbCrCoefficients"),
    (530, "YCbCrSubSampling"),
    (531, "YCbCrPositioning"),
    (532, "ReferenceBlackWhite"),
    (33432, "Copyright"),
    (34665, "ExifIFDPointer"),
    (34853, "GPSIFDPointer"),
];

const EXIF_LABELS: &[(u16, &str)] = &[
    (33434, "ExposureTime"),
    (33437, "FNumber"),
    (34850, "ExposureProgram"),
    (34852, "SpectralSensitivity"),
    (34855, "PhotographicSensitivity"),
    (34856, "OECF"),
    (34864, "SensitivityType"),
    (34865, "StandardOutputSensitivity"),
    (34866, "RecommendedExposureIndex"),
    (34867, "ISOSpeed"),
    (34868, "ISOSpeedLatitudeyyy"),
    (34869, "ISOSpeedLatitudezzz"),
    (36864, "ExifVersion"),
    (36867, "DateTimeOriginal"),
    (36868, "DateTimeDigitized"),
    (37121, "ComponentsConfiguration"),
    (37122, "CompressedBitsPerPixel"),
    (37377, "ShutterSpeedValue"),
    (37378, "ApertureValue"),
    (37379, "BrightnessValue"),
    (37380, "ExposureBiasValue"),
    (37381, "MaxApertureValue"),
    (37382, "SubjectDistance"),
    (37383, "MeteringMode"),
    (37384, "LightSource"),
    (37385, "Flash"),
    (37386, "FocalLength"),
    (37396, "SubjectArea"),
    (37500, "MakerNote"),
    (37510, "UserComment"),
    (37520, "SubSecTime"),
    (37521, "SubSecTimeOriginal"),
    (37522, "SubSecTimeDigitized"),
    (40960, "FlashpixVersion"),
    (40961, "ColorSpace"),
    (40962, "PixelXDimension"),
    (40963, "PixelYDimension"),
    (40964, "RelatedSoundFile"),
    (40965, "InteroperabilityIFDPointer"),
    (41483, "FlashEnergy"),
    (41484, "SpatialFrequencyResponse"),
    (41486, "FocalPlaneXResolution"),
    (41487, "FocalPlaneYResolution"),
    (41488, "FocalPlaneResolutionUnit"),
    (41492, "SubjectLocation"),
    (41493, "ExposureIndex"),
    (41495, "SensingMethod"),
    (41728, "FileSource"),
    (41729, "SceneType"),
    (41730, "CFAPattern"),
    (41985, "CustomRendered"),
    (41986, "ExposureMode"),
    (41987, "WhiteBalance"),
    (41988, "DigitalZoomRatio"),
    (41989, "FocalLengthIn35mmFilm"),
    (41990, "SceneCaptureType"),
    (41991, "GainControl"),
    (41992, "Contrast"),
    (41993, "Saturation"),
    (41994, "Sharpness"),
    (41995, "DeviceSettingDescription"),
    (41996, "SubjectDistanceRange"),
    (42016, "ImageUniqueID"),
    (42032, "CameraOwnerName"),
    (42033, "BodySerialNumber"),
    (42034, "LensSpecification"),
    (42035, "LensMake"),
    (42036, "LensModel"),
    (42037, "LensSerialNumber"),
    (42240, "Gamma"),
];

const GPS_LABELS: &[(u16, &str)] = &[
    (0, "GPSVersionID"),
    (1, "GPSLatitudeRef"),
    (2, "GPSLatitude"),
    (3, "GPSLongitudeRef"),
    (4, "GPSLongitude"),
    (5, "GPSAltitudeRef"),
    (6, "GPSAltitude"),
    (7, "GPSTimeStamp"),
    (8, "GPSSatellites"),
    (9, "GPSStatus"),
    (10, "GPSMeasureMode"),
    (11, "GPSDOP"),
    (12, "GPSSpeedRef"),
    (13, "GPSSpeed"),
    (14, "GPSTrackRef"),
    (15, "GPSTrack"),
    (16, "GPSImgDirectionRef"),
    (17, "GPSImgDirection"),
    (18, "GPSMapDatum"),
    (19, "GPSDestLatitudeRef"),
    (20, "GPSDestLatitude"),
    (21, "GPSDestLongitudeRef"),
    (22, "GPSDestLongitude"),
    (23, "GPSDestBearingRef"),
    (24, "GPSDestBearing"),
    (25, "GPSDestDistanceRef"),
    (26, "GPSDestDistance"),
    (27, "GPSProcessingMethod"),
    (28, "GPSAreaInformation"),
    (29, "GPSDateStamp"),
    (30, "GPSDifferential"),
    (31, "GPSHPositioningError"),
];
