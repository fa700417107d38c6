use cpf::creator::CreationResult;
use cpf::report::format_result;

#[test]
fn test_format_result() {
    let file = CreationResult::file("/templates/text.txt", "/out/text.txt");
    assert_eq!(format_result(&file), "File created at /out/text.txt");

    let folder = CreationResult::folder("/templates/docs", "/out/docs");
    assert_eq!(format_result(&folder), "Folder created at /out/docs");
}
